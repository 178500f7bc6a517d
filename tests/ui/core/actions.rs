use panelist::ui::core::actions::{Action, DialogType, Screen};

#[test]
fn test_screen_keys_round_trip() {
    for screen in Screen::ALL {
        assert_eq!(Screen::from_key(screen.key()), Some(screen));
    }
    assert_eq!(Screen::from_key("posts"), None);
}

#[test]
fn test_screen_navigation_wraps() {
    assert_eq!(Screen::default(), Screen::Categories);
    assert_eq!(Screen::Categories.next(), Screen::Banners);
    assert_eq!(Screen::Users.next(), Screen::Categories);
    assert_eq!(Screen::Categories.previous(), Screen::Users);
    assert_eq!(Screen::Users.index(), 2);
}

#[test]
fn test_action_enum_exists() {
    let action = Action::ShowDialog(DialogType::Help);
    assert!(matches!(action, Action::ShowDialog(DialogType::Help)));
    assert!(std::mem::size_of::<Action>() > 0);
}
