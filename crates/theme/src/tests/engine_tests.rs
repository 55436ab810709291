use super::*;

use std::cell::Cell;

use crate::{
    registry::DARK,
    style::ButtonVariant,
    themed::{Restyle, Themed},
};

struct Swatch {
    kind: ComponentKind,
    sheet: String,
}

impl Swatch {
    fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            sheet: String::new(),
        }
    }
}

impl Restyle for Swatch {
    fn component_kind(&self) -> ComponentKind {
        self.kind
    }

    fn restyle(&mut self, theme: &Theme) {
        self.sheet = style::component(theme, self.kind).to_string();
    }
}

fn counting_subscriber(engine: &ThemeEngine) -> (Rc<Cell<usize>>, shared::Subscription) {
    let hits = Rc::new(Cell::new(0));
    let sub = {
        let hits = Rc::clone(&hits);
        engine.subscribe(move |_| hits.set(hits.get() + 1))
    };
    (hits, sub)
}

#[test]
fn starts_light() {
    let engine = ThemeEngine::new();
    assert_eq!(engine.active_theme_name(), ThemeName::Light);
    assert_eq!(engine.color("background"), "#ffffff");
    assert_eq!(engine.text_color("primary"), "#212529");
}

#[test]
fn switching_updates_name_and_data() {
    let engine = ThemeEngine::new();

    engine.switch_theme("dark").expect("switch to dark");
    assert_eq!(engine.active_theme_name(), ThemeName::Dark);
    assert_eq!(engine.color("background"), "#212529");
    assert_eq!(engine.active_theme_data(), DARK);

    engine.switch_theme("light").expect("switch to light");
    assert_eq!(engine.color("background"), "#ffffff");
}

#[test]
fn invalid_names_leave_state_untouched() {
    let engine = ThemeEngine::new();
    engine.switch_theme("dark").expect("switch to dark");
    let (hits, _sub) = counting_subscriber(&engine);

    for bad in ["invalid", "", "LIGHT", "high-contrast"] {
        let err = engine.switch_theme(bad).expect_err("should reject");
        assert_eq!(err, ThemeError::InvalidTheme(bad.to_string()));
        assert_eq!(engine.active_theme_name(), ThemeName::Dark);
    }
    assert_eq!(hits.get(), 0);
}

#[test]
fn switching_to_active_theme_is_silent() {
    let engine = ThemeEngine::new();
    let (hits, _sub) = counting_subscriber(&engine);

    engine.switch_theme("light").expect("same theme");
    assert_eq!(hits.get(), 0);

    engine.switch_theme("dark").expect("dark");
    engine.switch_theme("dark").expect("dark again");
    assert_eq!(hits.get(), 1);
}

#[test]
fn rapid_switches_are_not_coalesced() {
    let engine = ThemeEngine::new();
    let (hits, _sub) = counting_subscriber(&engine);

    engine.switch_to(ThemeName::Dark);
    engine.switch_to(ThemeName::Light);
    engine.switch_to(ThemeName::Dark);
    assert_eq!(hits.get(), 3);
}

#[test]
fn subscribers_see_new_snapshot_in_subscription_order() {
    let engine = ThemeEngine::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let _first = {
        let log = Rc::clone(&log);
        engine.subscribe(move |theme| log.borrow_mut().push(("first", theme.background)))
    };
    let _second = {
        let log = Rc::clone(&log);
        engine.subscribe(move |theme| log.borrow_mut().push(("second", theme.background)))
    };

    engine.switch_theme("dark").expect("dark");
    assert_eq!(
        *log.borrow(),
        vec![("first", "#212529"), ("second", "#212529")]
    );
}

#[test]
fn subscribers_can_read_engine_during_fan_out() {
    let engine = ThemeEngine::shared();
    let seen = Rc::new(Cell::new(""));
    let _sub = {
        let weak = Rc::downgrade(&engine);
        let seen = Rc::clone(&seen);
        engine.subscribe(move |_| {
            if let Some(engine) = weak.upgrade() {
                seen.set(engine.color("surface"));
            }
        })
    };

    engine.switch_to(ThemeName::Dark);
    assert_eq!(seen.get(), "#2c3034");
}

#[test]
fn returned_data_is_a_copy() {
    let engine = ThemeEngine::new();
    let mut data = engine.active_theme_data();
    data.background = "#000000";
    assert_eq!(engine.color("background"), "#ffffff");
}

#[test]
fn unknown_keys_fall_back_to_empty() {
    let engine = ThemeEngine::new();
    assert_eq!(engine.color("nonexistent"), "");
    assert_eq!(engine.text_color("nonexistent"), "");
}

#[test]
fn component_style_tracks_active_theme() {
    let engine = ThemeEngine::new();
    let light = engine.component_style(ComponentKind::Input).to_string();
    engine.switch_to(ThemeName::Dark);
    let dark = engine.component_style(ComponentKind::Input).to_string();

    assert_ne!(light, dark);
    assert!(dark.contains("#2c3034"));
}

#[test]
fn every_component_kind_restyles_on_switch() {
    let engine = ThemeEngine::shared();
    let kinds = [
        ComponentKind::Button,
        ComponentKind::Input,
        ComponentKind::Checkbox,
        ComponentKind::DataGrid,
        ComponentKind::FilterBar,
        ComponentKind::FileBrowser,
        ComponentKind::Form,
        ComponentKind::Card,
        ComponentKind::Label,
    ];
    let widgets: Vec<Themed<Swatch>> = kinds
        .iter()
        .map(|kind| Swatch::new(*kind).themed(&engine))
        .collect();
    let before: Vec<String> = widgets.iter().map(|w| w.borrow().sheet.clone()).collect();

    engine.switch_to(ThemeName::Dark);

    for (widget, old) in widgets.iter().zip(&before) {
        assert_ne!(
            &widget.borrow().sheet,
            old,
            "{} kept its light style",
            widget.component_kind()
        );
    }
}

#[test]
fn round_trip_restores_original_style() {
    let engine = ThemeEngine::shared();
    let widget = Swatch::new(ComponentKind::Button).themed(&engine);
    let original = widget.borrow().sheet.clone();

    engine.switch_to(ThemeName::Dark);
    engine.switch_to(ThemeName::Light);

    assert_eq!(widget.borrow().sheet, original);
    assert_eq!(
        original,
        style::button(&crate::registry::LIGHT, ButtonVariant::Primary).to_string()
    );
}

#[test]
fn switch_during_fan_out_leaves_every_widget_on_active_theme() {
    let engine = ThemeEngine::shared();
    let _revert = {
        let weak = Rc::downgrade(&engine);
        engine.subscribe(move |theme| {
            if theme.name == ThemeName::Dark {
                if let Some(engine) = weak.upgrade() {
                    engine.switch_theme("light").expect("switch back");
                }
            }
        })
    };
    let widget = Swatch::new(ComponentKind::Input).themed(&engine);
    let (hits, _counter) = counting_subscriber(&engine);

    engine.switch_to(ThemeName::Dark);

    assert_eq!(engine.active_theme_name(), ThemeName::Light);
    assert_eq!(
        widget.borrow().sheet,
        engine.component_style(ComponentKind::Input).to_string()
    );
    assert_eq!(hits.get(), 1);
}
