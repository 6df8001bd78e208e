use anyhow::{Context, Result};
use colored::Colorize;
use floorpath::render::SvgOptions;
use std::path::Path;

use crate::cli::RouteArgs;

/// Run the route animation to completion and write every floor as SVG.
pub fn run(args: &RouteArgs, output_dir: &Path, smil: bool) -> Result<()> {
    let mut widget = super::routed_widget(args)?;
    widget.run_until_idle();

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let svg_options = SvgOptions {
        now: widget.now(),
        smil,
    };
    for diagram in widget.diagrams() {
        let path = output_dir.join(format!("{}.svg", file_stem(diagram.id())));
        std::fs::write(&path, diagram.to_svg(svg_options))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        let note = if diagram.routes.is_empty() {
            String::new()
        } else {
            format!(" ({} path(s))", diagram.routes.len())
        };
        println!("  Wrote {}{note}", path.display());
    }

    let length = widget.drawing().map_or(0.0, |d| d.total_length());
    println!(
        "{}",
        format!(
            "Rendered route to '{}' ({length} units) in {}/",
            args.to,
            output_dir.display()
        )
        .green()
    );
    Ok(())
}

/// Floor ids come from the bundle; keep them from escaping `output_dir`.
fn file_stem(id: &str) -> String {
    let stem: String = id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "floor".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_keeps_plain_ids() {
        assert_eq!(file_stem("ground"), "ground");
        assert_eq!(file_stem("map_1"), "map_1");
        assert_eq!(file_stem("level-2"), "level-2");
    }

    #[test]
    fn file_stem_strips_path_separators() {
        assert_eq!(file_stem("../x"), "___x");
        assert_eq!(file_stem("a/b\\c"), "a_b_c");
        assert_eq!(file_stem(""), "floor");
    }
}
