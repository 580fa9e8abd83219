use sattrack_lib::config::Config;
use std::{collections::HashSet, fs, path::Path, time::Duration};

const CONFIG_FILES: &[&str] = &["example.toml", "local_services.toml"];

#[test]
fn example_config_file_list_matches_expected() {
    let cfg_files: HashSet<String> = fs::read_dir("../configs")
        .unwrap()
        .map(|d| d.unwrap().file_name().into_string().unwrap())
        .collect();
    let expected: HashSet<String> = CONFIG_FILES.iter().map(|f| f.to_string()).collect();
    assert_eq!(cfg_files, expected, "Example configs directory is missing an expected config file or contains a new config file that should be tested");
}

#[test]
fn example_config_files_parse() {
    let dir = Path::new("../configs");
    for cfg_file in CONFIG_FILES {
        let p = dir.join(cfg_file);
        let cfg = Config::load(&p).unwrap();
        cfg.http.agent().unwrap();
        cfg.n2yo.base_url().unwrap();
        cfg.geocoder.base_url().unwrap();
        cfg.imagery.default_image_url().unwrap();
    }
}

#[test]
fn example_config_matches_defaults() {
    let cfg = Config::load("../configs/example.toml").unwrap();
    let defaults = Config::default();
    assert_eq!(cfg.n2yo.base_url().unwrap(), defaults.n2yo.base_url().unwrap());
    assert_eq!(
        cfg.geocoder.base_url().unwrap(),
        defaults.geocoder.base_url().unwrap()
    );
    assert_eq!(
        cfg.geocoder.result_limit().unwrap(),
        defaults.geocoder.result_limit().unwrap()
    );
    assert_eq!(
        cfg.imagery.default_image_url().unwrap(),
        defaults.imagery.default_image_url().unwrap()
    );
    assert_eq!(cfg.http.timeout().unwrap(), Duration::from_secs(10));
}

#[test]
fn missing_config_file_is_an_error() {
    assert!(Config::load("../configs/does_not_exist.toml").is_err());
}
