//! Diesel table definitions for the settings store.

diesel::table! {
    users (id) {
        id -> Uuid,
        email -> Text,
        display_name -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    accessibility_settings (id) {
        id -> Uuid,
        user_id -> Uuid,
        voice_navigation -> Bool,
        screen_reader -> Bool,
        high_contrast -> Bool,
        large_text -> Bool,
        keyboard_nav -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(accessibility_settings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(accessibility_settings, users);
