use tera::Tera;

/// Templates shipped with the crate
pub const DEFAULT_TEMPLATES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

/// Parse every `*.html` template under `dir` (or the bundled directory)
pub fn load_templates(dir: Option<&str>) -> Result<Tera, tera::Error> {
    let dir = dir.unwrap_or(DEFAULT_TEMPLATES_DIR).trim_end_matches('/');
    let tera = Tera::new(&format!("{}/**/*.html", dir))?;
    tracing::info!(
        templates_dir = dir,
        templates = tera.get_template_names().count(),
        "Templates loaded"
    );
    Ok(tera)
}
