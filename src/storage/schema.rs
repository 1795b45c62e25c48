diesel::table! {
    clipboard (id) {
        id -> Integer,
        content -> Text,
        timestamp -> Text,
    }
}
