use super::*;

#[test]
fn builtin_has_four_templates_in_id_order() {
    let catalog = TemplateCatalog::builtin();
    assert_eq!(catalog.len(), 4);
    let ids: Vec<u32> = catalog.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn known_ids_resolve_exactly() {
    let catalog = TemplateCatalog::builtin();
    assert_eq!(catalog.get(2).name, "Warm Gradient Modern");
    assert_eq!(catalog.get(3).font_family, "Inter");
    assert_eq!(catalog.get(4).background, BackgroundKind::Solid);
}

#[test]
fn unknown_ids_fall_back_to_teal_gradient() {
    let catalog = TemplateCatalog::builtin();
    for id in [0, 5, 42, u32::MAX] {
        let t = catalog.get(id);
        assert_eq!(t.id, 1);
        assert_eq!(t.name, "Teal Gradient Professional");
        assert!(catalog.find(id).is_none());
        assert_eq!(t, catalog.default_template());
    }
}

#[test]
fn text_colors_follow_background_kind() {
    let catalog = TemplateCatalog::builtin();
    assert_eq!(catalog.get(1).text_color().unwrap(), Rgb8::WHITE);
    assert_eq!(catalog.get(1).header_color().unwrap(), Rgb8::WHITE);

    let minimal = catalog.get(4);
    assert_eq!(minimal.text_color().unwrap(), Rgb8::new(0x1f, 0x29, 0x37));
    assert_eq!(minimal.header_color().unwrap(), Rgb8::new(0xf3, 0xf4, 0xf6));
}

#[test]
fn every_builtin_color_parses() {
    for t in TemplateCatalog::builtin().iter() {
        assert!(t.primary_rgb().is_ok(), "{}", t.name);
        assert!(t.secondary_rgb().is_ok(), "{}", t.name);
    }
}
