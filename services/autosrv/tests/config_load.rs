//! Configuration loading tests

use autosrv::config::Config;
use level_control::Role;
use level_model::PointId;
use serial_test::serial;
use std::io::Write;

#[test]
#[serial]
fn defaults_apply_without_a_file() {
    let config = Config::load(None).expect("defaults must load");
    assert_eq!(config.service.name, "autosrv");
    assert_eq!(config.automation.poll_interval_seconds, 1);
    assert_eq!(config.automation.unit_address, 1);
    assert_eq!(config.points.monitored_set().point(Role::K), PointId::analog(2000));
}

#[test]
#[serial]
fn yaml_file_overrides_defaults_per_field() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("tempfile");
    write!(
        file,
        r#"
service:
  name: autosrv-test
automation:
  poll_interval_seconds: 5
points:
  k:
    point_type: A
    address: 2100
    egu_max: 20.0
    low_limit: 4.0
"#
    )
    .expect("write yaml");

    let config = Config::load(Some(file.path())).expect("yaml must load");
    assert_eq!(config.service.name, "autosrv-test");
    // Untouched fields keep their defaults
    assert_eq!(config.service.log_level, "info");
    assert_eq!(config.automation.poll_interval_seconds, 5);
    assert_eq!(config.automation.unit_address, 1);

    let k = &config.points.k;
    assert_eq!(k.id(), PointId::analog(2100));
    assert_eq!(k.egu_max, 20.0);
    assert_eq!(k.low_limit, Some(4.0));
    // Other roles keep the classic binding
    assert_eq!(config.points.t1.id(), PointId::digital(1000));
}

#[test]
#[serial]
fn env_overrides_beat_the_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "autosrv.yaml",
            r#"
automation:
  unit_address: 2
"#,
        )?;
        jail.set_env("AUTOSRV_AUTOMATION__UNIT_ADDRESS", "7");

        let config = Config::load(Some(std::path::Path::new("autosrv.yaml")))
            .expect("config must load");
        assert_eq!(config.automation.unit_address, 7);
        Ok(())
    });
}
