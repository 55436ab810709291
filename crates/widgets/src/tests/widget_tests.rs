use egui::{CentralPanel, Context, RawInput, Rect};
use theme::{ButtonVariant, Restyle, ThemeEngine, ThemeName};

use crate::{
    Button, Card, Checkbox, DataGrid, FileBrowserDialog, FormBuilder, FormSchema, Input, Label,
    LoadingSpinner, NotificationCenter, NotificationKind, ProgressBarWithLabel,
};

#[test]
fn primary_button_restyles_on_dark_switch() {
    let engine = ThemeEngine::shared();
    let button = Button::new("Save").themed(&engine);
    assert!(button.borrow().style().to_string().contains("#007bff"));

    engine.switch_theme("dark").expect("known theme");
    let sheet = button.borrow().style().to_string();
    assert!(sheet.contains("#0d6efd"));
    assert!(!sheet.contains("#007bff"));
}

#[test]
fn widgets_are_styled_at_construction() {
    let engine = ThemeEngine::shared();
    let checkbox = Checkbox::new("Remember me").themed(&engine);
    assert!(!checkbox.borrow().style().is_empty());
    assert_eq!(
        checkbox.borrow().style().value("checkbox::indicator", "background-color"),
        Some(theme::LIGHT.checkbox.background)
    );
}

#[test]
fn widgets_of_one_kind_render_identically() {
    let engine = ThemeEngine::shared();
    let first = Input::new("a").themed(&engine);
    let second = Input::password("b").themed(&engine);
    assert_eq!(first.borrow().style(), second.borrow().style());

    engine.switch_to(ThemeName::Dark);
    assert_eq!(
        first.borrow().style().to_string(),
        second.borrow().style().to_string()
    );
}

#[test]
fn round_trip_restores_light_styles() {
    let engine = ThemeEngine::shared();
    let card = Card::new().themed(&engine);
    let input = Input::new("name").themed(&engine);
    let before = (card.borrow().style().clone(), input.borrow().style().clone());

    engine.switch_to(ThemeName::Dark);
    assert!(card.borrow().style().to_string().contains("#212529"));
    assert!(input.borrow().style().to_string().contains("#2c3034"));

    engine.switch_to(ThemeName::Light);
    assert_eq!(card.borrow().style(), &before.0);
    assert_eq!(input.borrow().style(), &before.1);
}

#[test]
fn every_widget_style_changes_on_switch() {
    let engine = ThemeEngine::shared();
    let button = Button::new("Go").themed(&engine);
    let input = Input::new("").themed(&engine);
    let checkbox = Checkbox::new("x").themed(&engine);
    let card = Card::new().themed(&engine);
    let label = Label::heading("Title", 2).themed(&engine);
    let grid = DataGrid::bound(&engine);
    let browser = FileBrowserDialog::bound(&engine, &[]);
    let form = FormBuilder::new(&engine, FormSchema::default());

    let before = [
        button.borrow().style().clone(),
        input.borrow().style().clone(),
        checkbox.borrow().style().clone(),
        card.borrow().style().clone(),
        label.borrow().style().clone(),
        grid.borrow().style().clone(),
        browser.borrow().style().clone(),
        form.borrow().label_style().clone(),
    ];
    engine.switch_to(ThemeName::Dark);
    let after = [
        button.borrow().style().clone(),
        input.borrow().style().clone(),
        checkbox.borrow().style().clone(),
        card.borrow().style().clone(),
        label.borrow().style().clone(),
        grid.borrow().style().clone(),
        browser.borrow().style().clone(),
        form.borrow().label_style().clone(),
    ];

    for (light, dark) in before.iter().zip(&after) {
        assert_ne!(light, dark);
    }
}

#[test]
fn variant_and_heading_changes_keep_current_theme() {
    let engine = ThemeEngine::shared();
    let button = Button::new("Go").themed(&engine);
    let label = Label::new("body").themed(&engine);
    engine.switch_to(ThemeName::Dark);

    button.borrow_mut().set_secondary();
    assert_eq!(button.borrow().variant(), ButtonVariant::Secondary);
    assert_eq!(
        button.borrow().style().value("button", "background-color"),
        Some(theme::DARK.button.secondary_bg)
    );

    label.borrow_mut().set_heading(1);
    label.borrow_mut().set_heading(7);
    let label = label.borrow();
    assert_eq!(label.style().value("label", "font-size"), Some("32px"));
    assert_eq!(label.style().value("label", "color"), Some(theme::DARK.text.primary));
}

#[test]
fn dropping_widgets_unsubscribes() {
    let engine = ThemeEngine::shared();
    let button = Button::new("a").themed(&engine);
    let grid = DataGrid::bound(&engine);
    // Grid, its filter bar and the filter bar's clear button.
    assert_eq!(engine.subscriber_count(), 4);

    drop(grid);
    assert_eq!(engine.subscriber_count(), 1);
    drop(button);
    assert_eq!(engine.subscriber_count(), 0);
    engine.switch_to(ThemeName::Dark);
}

#[test]
fn widgets_render_headless() {
    let engine = ThemeEngine::shared();
    let button = Button::new("Save").themed(&engine);
    let input = Input::new("Search").themed(&engine);
    let checkbox = Checkbox::new("Check").themed(&engine);
    let card = Card::new().themed(&engine);
    let label = Label::heading("Heading", 1).themed(&engine);
    let grid = DataGrid::bound(&engine);
    let mut progress = ProgressBarWithLabel::new("Progress", true, false);
    progress.bar.set_value(50.0).expect("value in range");
    let mut spinner = LoadingSpinner::new();
    spinner.start();
    let mut notifications = NotificationCenter::new();
    notifications.notify("hello", NotificationKind::Info);

    let ctx = Context::default();
    for theme in [ThemeName::Light, ThemeName::Dark] {
        engine.switch_to(theme);
        crate::apply_theme(&ctx, &engine.active_theme_data());
        let _ = ctx.run(RawInput::default(), |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                card.borrow().show(ui, |ui| {
                    label.borrow().show(ui);
                    button.borrow().show(ui);
                    input.borrow_mut().show(ui);
                    checkbox.borrow_mut().show(ui);
                });
                grid.borrow_mut().show(ui);
                progress.show(ui);
                spinner.show(ui);
            });
            let bounds = Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
            notifications.show(ctx, bounds);
        });
    }
    assert_eq!(notifications.len(), 1);
}
