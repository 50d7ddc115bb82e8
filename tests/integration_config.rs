use muhasib::config::Config;
use muhasib::config::ENV_BIRDEYE_API_KEY;
use muhasib::config::ENV_OUTPUT_DIR;
use muhasib::config::ENV_SOLANA_RPC_URL;
use muhasib::config::ENV_TARGET_WALLET;
use muhasib::config::load_config;
use muhasib::config::validate_wallet_address;
use muhasib::error::ConfigError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;

const WALLET: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

const ENV_KEYS: [&str; 4] = [ENV_SOLANA_RPC_URL, ENV_BIRDEYE_API_KEY, ENV_TARGET_WALLET, ENV_OUTPUT_DIR];

fn without_env<R>(f: impl FnOnce() -> R) -> R {
    temp_env::with_vars_unset(ENV_KEYS, f)
}

#[test]
#[serial]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = without_env(|| load_config(dir.path().join("absent.toml"))).unwrap();

    assert_eq!(config.rpc.primary_url().as_deref(), Some("https://api.mainnet-beta.solana.com"));
    assert_eq!(config.analyzer.signature_limit, 1000);
    assert_eq!(config.monitor.poll_interval_ms, 10_000);
    assert_eq!(config.monitor.signature_window, 10);
    assert_eq!(config.export.output_dir, "./output");
    assert!(!config.market_data.has_api_key());
}

#[test]
#[serial]
fn file_values_are_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Config.toml");
    std::fs::write(
        &path,
        r#"
[analyzer]
target_wallet = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM"
signature_limit = 250

[monitor]
poll_interval_ms = 2500

[[rpc.providers]]
name = "helius"
url = "mainnet.helius-rpc.com"
api_key = "abc"
rate_limit = 10
"#,
    )
    .unwrap();

    let config = without_env(|| load_config(&path)).unwrap();

    assert_eq!(config.analyzer.signature_limit, 250);
    assert_eq!(config.monitor.poll_interval_ms, 2500);
    assert_eq!(config.monitor.signature_window, 10);
    assert_eq!(config.rpc.primary_url().as_deref(), Some("https://mainnet.helius-rpc.com/?api-key=abc"));
    assert_eq!(config.target_wallet(None).unwrap().to_string(), WALLET);
}

#[test]
#[serial]
fn environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Config.toml");
    std::fs::write(&path, "[export]\noutput_dir = \"from-file\"\n").unwrap();

    let config = temp_env::with_vars(
        [
            (ENV_SOLANA_RPC_URL, Some("http://localhost:8899")),
            (ENV_BIRDEYE_API_KEY, Some("secret")),
            (ENV_TARGET_WALLET, Some(WALLET)),
            (ENV_OUTPUT_DIR, Some("from-env")),
        ],
        || load_config(&path),
    )
    .unwrap();

    assert_eq!(config.rpc.primary_url().as_deref(), Some("http://localhost:8899"));
    assert!(config.market_data.has_api_key());
    assert_eq!(config.analyzer.target_wallet.as_deref(), Some(WALLET));
    assert_eq!(config.export.output_dir, "from-env");
}

#[test]
#[serial]
fn blank_environment_values_are_ignored() {
    let mut config = Config::default();

    temp_env::with_vars([(ENV_OUTPUT_DIR, Some("  ")), (ENV_TARGET_WALLET, Some(""))], || {
        config.apply_env_overrides()
    });

    assert_eq!(config.export.output_dir, "./output");
    assert_eq!(config.analyzer.target_wallet, None);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = Config::from_toml_str("[analyzer\nsignature_limit = ").unwrap_err();

    assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::ParseError(_))));
}

#[test]
fn override_wallet_wins() {
    let config = Config::default();

    assert_eq!(config.target_wallet(Some(WALLET)).unwrap().to_string(), WALLET);
    assert!(matches!(
        config.target_wallet(None).unwrap_err().downcast_ref::<ConfigError>(),
        Some(ConfigError::MissingWalletAddress)
    ));
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_wallet_is_missing(#[case] address: &str) {
    let err = validate_wallet_address(address).unwrap_err();

    assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::MissingWalletAddress)));
}

#[rstest]
#[case("not-a-wallet")]
#[case("0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl")]
#[case("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGY")]
fn malformed_wallet_is_rejected(#[case] address: &str) {
    let err = validate_wallet_address(address).unwrap_err();

    assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::InvalidWalletAddress { .. })));
}

#[test]
fn wallet_is_trimmed() {
    assert_eq!(validate_wallet_address(&format!("  {}\n", WALLET)).unwrap().to_string(), WALLET);
}
