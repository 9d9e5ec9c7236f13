pub mod schema {
    diesel::table! {
        tasks (id) {
            id -> Uuid,
            title -> Text,
            description -> Nullable<Text>,
            completed -> Bool,
            created_at -> Timestamptz,
            updated_at -> Timestamptz,
        }
    }
}
