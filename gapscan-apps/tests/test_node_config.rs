use gapscan_apps::NodeConfig;
use gapscan_sweep::BinaryLayout;

#[test]
fn verify_sample_configs() {
    let files = vec![
        "config/sample_node_config.toml",
        "config/fine_sweep_config.toml",
    ];
    for f in files {
        let result = NodeConfig::new(f);
        assert!(result.is_ok(), "{:?} {:?}", f, result);
        let ser_result = toml::to_string(&result.unwrap());
        assert!(ser_result.is_ok(), "{:?} {:?}", f, ser_result);
    }
}

#[test]
fn sample_config_matches_defaults() {
    let config = NodeConfig::new("config/sample_node_config.toml").unwrap();
    assert_eq!(config.sweep, Default::default());
    assert_eq!(config.room.doorways.len(), 2);

    let fine = NodeConfig::new("config/fine_sweep_config.toml").unwrap();
    assert_eq!(fine.sweep.layout, BinaryLayout::Full);
    assert_eq!(fine.sweep.steps_per_sweep(), 180);
}

#[test]
fn ser_default_config() {
    let s = toml::to_string(&NodeConfig::default()).unwrap();
    assert_eq!(NodeConfig::from_str(&s, "default.toml").unwrap(), NodeConfig::default());
}
