//! Diesel table definitions for the columns the query DSL touches.
//!
//! `promotions`, `wallets` and `transactions` carry numeric and vector
//! columns and are only reached through `sql_query`, so they have no
//! `table!` entry here. Keep these definitions in step with the
//! migrations under `backend/migrations`.

diesel::table! {
    /// Websites registered by their owners.
    websites (website_id) {
        website_id -> Uuid,
        owner_id -> Uuid,
        domain_name -> Text,
        /// Secret embedded in the widget snippet.
        verification_token -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Articles ingested from a website.
    content_items (content_id) {
        content_id -> Uuid,
        website_id -> Uuid,
        title -> Text,
        description -> Nullable<Text>,
        tags -> Array<Text>,
        category -> Nullable<Text>,
        original_url -> Nullable<Text>,
        image_url -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(content_items -> websites (website_id));
diesel::allow_tables_to_appear_in_same_query!(websites, content_items);
