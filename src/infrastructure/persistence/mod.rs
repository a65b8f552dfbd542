//! Persistence adapters

mod supabase;

pub use supabase::SupabaseClient;
