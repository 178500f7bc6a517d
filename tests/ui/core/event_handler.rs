use panelist::ui::core::event_handler::{EventHandler, EventType};
use std::time::Duration;

#[test]
fn test_default_tick_rate() {
    let handler = EventHandler::new();
    assert_eq!(handler.tick_rate(), Duration::from_millis(100));
}

#[test]
fn test_custom_tick_rate() {
    let handler = EventHandler::with_tick_rate(Duration::from_millis(250));
    assert_eq!(handler.tick_rate(), Duration::from_millis(250));
}

#[test]
fn test_event_type_enum_exists() {
    let event = EventType::Paste("token".to_string());
    assert!(matches!(event, EventType::Paste(ref text) if text == "token"));
    assert!(std::mem::size_of::<EventType>() > 0);
}
