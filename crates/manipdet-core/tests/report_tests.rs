use manipdet_core::config::RunConfig;
use manipdet_core::report::render_lines;

#[test]
fn two_fields_render_four_lines() {
    let fields = vec![("a", "1".to_string()), ("b", "x".to_string())];
    let lines = render_lines(&fields);
    assert_eq!(lines.len(), fields.len() + 2);
    assert_eq!(lines[0], "----------Arguments-----------");
    assert_eq!(lines[1], "a = 1");
    assert_eq!(lines[2], "b = x");
    assert_eq!(lines[3], "------------------------------");
}

#[test]
fn empty_field_list_renders_banners_only() {
    let lines = render_lines(&[]);
    assert_eq!(lines.len(), 2);
}

#[test]
fn config_fields_render_in_declaration_order() {
    let config = RunConfig::default();
    let names: Vec<&str> = config.fields().into_iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        [
            "log_dir",
            "model",
            "gpu",
            "train_data",
            "batch_size",
            "learning_rate",
            "seed"
        ]
    );
}

#[test]
fn absent_train_data_renders_as_none() {
    let config = RunConfig::default();
    let fields = config.fields();
    let (_, value) = fields
        .iter()
        .find(|(name, _)| *name == "train_data")
        .expect("train_data field");
    assert_eq!(value, "none");
}
