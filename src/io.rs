use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::events::ControlEvent;
use crate::events::Event;
use crate::events::Modifiers;
use crate::events::PointerClick;
use crate::terminal::TerminalView;

/// Converts a crossterm event into a harness event
pub fn convert_event(event: CrossTermEvent, view: &TerminalView) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers,
        }) => Some(Event::Pointer(PointerClick {
            position: view.pointer_at(column, row),
            modifiers: convert_modifiers(modifiers),
        })),
        CrossTermEvent::Resize(cols, rows) => Some(Event::Resize { cols, rows }),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let control = |c| Some(Event::Control(c));

    match key_event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        } => Some(Event::Exit),
        KeyEvent {
            code: KeyCode::Char(' ' | 'p'),
            ..
        } => control(ControlEvent::PlayPause),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => control(ControlEvent::Restart),
        KeyEvent {
            code: KeyCode::Char('c'),
            ..
        } => control(ControlEvent::Clear),
        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => control(ControlEvent::AdjustTicksPerFrame(1)),
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => control(ControlEvent::AdjustTicksPerFrame(-1)),
        KeyEvent {
            code: KeyCode::Char(c @ '1'..='9'),
            ..
        } => control(ControlEvent::SetTicksPerFrame(c.to_string())),
        _ => None,
    }
}

fn convert_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        // most terminals never report super, so alt stands in for it
        meta: modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META | KeyModifiers::ALT),
        shift: modifiers.contains(KeyModifiers::SHIFT),
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyModifiers;
    use crossterm::event::MouseButton;
    use crossterm::event::MouseEvent;
    use crossterm::event::MouseEventKind;

    use super::convert_event;
    use crate::events::ControlEvent;
    use crate::events::Event;
    use crate::events::Modifiers;
    use crate::pattern::Pattern;
    use crate::terminal::TerminalView;

    fn view() -> TerminalView {
        TerminalView::new((129, 129), 1, (200, 100))
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(code, modifiers))
    }

    fn control(event: Option<Event>) -> Option<ControlEvent> {
        match event {
            Some(Event::Control(c)) => Some(c),
            _ => None,
        }
    }

    #[test]
    fn keys() {
        let v = view();
        let k = |c| convert_event(key(KeyCode::Char(c), KeyModifiers::NONE), &v);

        assert!(matches!(k('q'), Some(Event::Exit)));
        assert_eq!(control(k(' ')), Some(ControlEvent::PlayPause));
        assert_eq!(control(k('r')), Some(ControlEvent::Restart));
        assert_eq!(control(k('c')), Some(ControlEvent::Clear));
        assert_eq!(control(k('+')), Some(ControlEvent::AdjustTicksPerFrame(1)));
        assert_eq!(control(k('-')), Some(ControlEvent::AdjustTicksPerFrame(-1)));
        assert_eq!(
            control(k('7')),
            Some(ControlEvent::SetTicksPerFrame("7".to_string()))
        );
        assert!(k('x').is_none());

        let ctrl_c = convert_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &v);
        assert!(matches!(ctrl_c, Some(Event::Exit)));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        assert!(convert_event(CrossTermEvent::Key(release), &view()).is_none());
    }

    #[test]
    fn clicks() {
        let v = view();
        let click = |modifiers| {
            convert_event(
                CrossTermEvent::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column: 4,
                    row: 2,
                    modifiers,
                }),
                &v,
            )
        };

        let Some(Event::Pointer(plain)) = click(KeyModifiers::NONE) else {
            panic!("expected a pointer event");
        };
        assert_eq!(plain.modifiers, Modifiers::NONE);
        assert_eq!((plain.position.x, plain.position.y), (4.5, 2.5));

        let Some(Event::Pointer(ctrl)) = click(KeyModifiers::CONTROL) else {
            panic!("expected a pointer event");
        };
        assert_eq!(ctrl.modifiers.pattern(), Pattern::Glider);

        let Some(Event::Pointer(shift)) = click(KeyModifiers::SHIFT) else {
            panic!("expected a pointer event");
        };
        assert_eq!(shift.modifiers.pattern(), Pattern::Pulsar);
    }

    #[test]
    fn other_mouse_events_are_ignored() {
        let drag = CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });

        assert!(convert_event(drag, &view()).is_none());
    }
}
