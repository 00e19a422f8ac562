use actix_web_flash_messages::Level;
use fleetdesk::routes::{alert_level_to_str, check_role};

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[test]
fn test_check_role() {
    let roles = vec!["fleet".to_string(), "fleet_admin".to_string()];
    assert!(check_role("fleet", &roles));
    assert!(check_role("fleet_admin", &roles));
    assert!(!check_role("fleet_dispatcher", &roles));
    assert!(!check_role("fleet", &[]));
}
