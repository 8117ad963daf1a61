use super::*;

#[test]
fn cursor_wraps_in_both_directions() {
    let mut app = App::new(3, 1.0, 0.1);
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.next();
    app.next();
    assert_eq!(app.selected, 2);
}

#[test]
fn cursor_is_inert_without_tracks() {
    let mut app = App::new(0, 1.0, 0.1);
    app.next();
    app.prev();
    app.last();
    assert_eq!(app.selected, 0);
    assert!(!app.has_tracks());
}

#[test]
fn first_and_last_jump_to_the_ends() {
    let mut app = App::new(4, 1.0, 0.1);
    app.last();
    assert_eq!(app.selected, 3);
    app.first();
    assert_eq!(app.selected, 0);
}

#[test]
fn volume_slider_stays_within_bounds() {
    let mut app = App::new(1, 0.9, 0.25);
    assert_eq!(app.volume_up(), 1.0);
    assert_eq!(app.volume_up(), 1.0);

    let mut app = App::new(1, 0.1, 0.25);
    assert_eq!(app.volume_down(), 0.0);
    assert_eq!(app.volume_down(), 0.0);

    assert_eq!(App::new(1, 3.0, 0.1).volume, 1.0);
}
