/// Macro to generate a JSON schema from a tool input type
#[macro_export]
macro_rules! schema_from_type {
    ($type:ty) => {{
        match rmcp::serde_json::to_value(rmcp::schemars::schema_for!($type)) {
            Ok(rmcp::serde_json::Value::Object(schema)) => schema,
            _ => {
                tracing::error!("Failed to generate schema for {}", stringify!($type));
                rmcp::serde_json::Map::from_iter([(
                    "type".to_string(),
                    rmcp::serde_json::Value::from("object"),
                )])
            }
        }
    }};
}
