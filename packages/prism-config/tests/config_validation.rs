use toml::Value;

const SAMPLE_CONFIG_TOML: &str = r#"
[service]
http_bind = "127.0.0.1:8080"
log_level = "info"
bind_localhost_only = true

[backend]
api_base = "http://127.0.0.1:5500"
timeout_ms = 10000
process_timeout_ms = 600000

[workflow]
max_query_chars = 200
max_similar = 5
"#;

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

fn parse(value: Value) -> prism_config::Result<prism_config::Config> {
	let raw = toml::to_string(&value).expect("Failed to render config.");
	let cfg: prism_config::Config = toml::from_str(&raw).expect("Failed to parse config.");

	prism_config::validate(&cfg).map(|()| cfg)
}

fn set(value: &mut Value, section: &str, key: &str, new: Value) {
	value
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the section.")
		.insert(key.to_string(), new);
}

#[test]
fn accepts_sample_config() {
	let cfg = parse(sample_value()).expect("Sample config must validate.");

	assert_eq!(cfg.backend.search_path, "/api/search-topic");
	assert_eq!(cfg.backend.process_path, "/api/process");
	assert_eq!(cfg.backend.topics_path, "/api/topics");
}

#[test]
fn rejects_empty_api_base() {
	let mut value = sample_value();

	set(&mut value, "backend", "api_base", Value::String("  ".to_string()));

	let err = parse(value).expect_err("Empty api_base must be rejected.");

	assert!(err.to_string().contains("backend.api_base"));
}

#[test]
fn rejects_zero_timeout() {
	let mut value = sample_value();

	set(&mut value, "backend", "timeout_ms", Value::Integer(0));

	assert!(parse(value).is_err());
}

#[test]
fn rejects_relative_path() {
	let mut value = sample_value();

	set(&mut value, "backend", "search_path", Value::String("api/search-topic".to_string()));

	let err = parse(value).expect_err("Relative search_path must be rejected.");

	assert!(err.to_string().contains("backend.search_path"));
}

#[test]
fn rejects_zero_max_similar() {
	let mut value = sample_value();

	set(&mut value, "workflow", "max_similar", Value::Integer(0));

	assert!(parse(value).is_err());
}

#[test]
fn rejects_non_string_header_value() {
	let mut value = sample_value();
	let mut headers = toml::map::Map::new();

	headers.insert("x-api-key".to_string(), Value::Integer(7));
	set(&mut value, "backend", "default_headers", Value::Table(headers));

	assert!(parse(value).is_err());
}

#[test]
fn load_normalizes_trailing_slash() {
	let dir = std::env::temp_dir().join(format!("prism-config-test-{}", std::process::id()));

	std::fs::create_dir_all(&dir).expect("Failed to create temp dir.");

	let path = dir.join("prism.toml");
	let mut value = sample_value();

	set(&mut value, "backend", "api_base", Value::String("http://127.0.0.1:5500///".to_string()));
	std::fs::write(&path, toml::to_string(&value).expect("Failed to render config."))
		.expect("Failed to write config.");

	let cfg = prism_config::load(&path).expect("Config must load.");

	assert_eq!(cfg.backend.api_base, "http://127.0.0.1:5500");

	let _ = std::fs::remove_dir_all(&dir);
}
