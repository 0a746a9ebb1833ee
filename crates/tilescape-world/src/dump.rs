//! Bordered fixed-width text dump of a scene.
//!
//! Each row is cut into blocks of `block_width` characters joined by `##` and
//! framed by `#`. A border line of `#` opens every band of `rows_per_band` rows,
//! doubled between bands, and one more closes the file. The border width is the
//! scene width plus the framing characters.

use std::fs;
use std::path::Path;
use tilescape_core::{DumpLayout, Result, SceneGrid};
use tracing::info;

/// Render a scene in the dump layout. Fails on a layout with a zero size.
pub fn render_dump(scene: &SceneGrid, layout: &DumpLayout) -> Result<String> {
    layout.validate()?;

    let size = scene.width().max(0) as usize;
    let frame = 2 * layout.blocks_per_line;
    let border = border_line(size + frame);

    let mut out = String::new();
    for (i, row) in scene.rows().enumerate() {
        if i % layout.rows_per_band == 0 {
            out.push_str(&border);
            if i != 0 {
                out.push_str(&border);
            }
        }
        out.push_str(&format_row(row, layout));
    }

    let closing = if size % layout.block_width == 0 {
        size + frame
    } else {
        layout.block_width + frame
    };
    out.push_str(&border_line(closing));
    Ok(out)
}

/// Write a scene to `path` in the dump layout
pub fn write_dump(path: &Path, scene: &SceneGrid, layout: &DumpLayout) -> Result<()> {
    fs::write(path, render_dump(scene, layout)?)?;
    info!("Scene dump written to {:?}", path);
    Ok(())
}

fn border_line(len: usize) -> String {
    let mut line = "#".repeat(len);
    line.push('\n');
    line
}

fn format_row(row: &[char], layout: &DumpLayout) -> String {
    let blocks: Vec<String> = (0..layout.blocks_per_line)
        .map(|b| {
            let start = (b * layout.block_width).min(row.len());
            let end = ((b + 1) * layout.block_width).min(row.len());
            row[start..end].iter().collect()
        })
        .collect();

    format!("#{}#\n", blocks.join("##"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilescape_core::{Error, Grid};

    fn filled(width: i32, height: i32, c: char) -> SceneGrid {
        Grid::new(width, height, c)
    }

    #[test]
    fn test_full_width_layout() {
        let scene = filled(60, 2, 'M');
        let dump = render_dump(&scene, &DumpLayout::default()).unwrap();
        let lines: Vec<&str> = dump.lines().collect();

        let border = "#".repeat(66);
        let block = "M".repeat(20);
        let row = format!("#{}##{}##{}#", block, block, block);

        assert_eq!(lines, vec![border.as_str(), row.as_str(), row.as_str(), border.as_str()]);
        assert!(dump.ends_with('\n'));
    }

    #[test]
    fn test_narrow_rows_keep_empty_blocks() {
        let scene = Grid::from_rows(vec!["M T  ".chars().collect()]).unwrap();
        let dump = render_dump(&scene, &DumpLayout::default()).unwrap();

        let expected = format!("{}\n#M T  #####\n{}\n", "#".repeat(11), "#".repeat(26));
        assert_eq!(dump, expected);
    }

    #[test]
    fn test_band_borders_double_up() {
        let scene = filled(20, 41, ' ');
        let dump = render_dump(&scene, &DumpLayout::default()).unwrap();
        let lines: Vec<&str> = dump.lines().collect();

        // rows + one opening border + two per later band + closing border
        assert_eq!(lines.len(), 41 + 1 + 2 + 2 + 1);
        let border = "#".repeat(26);
        assert_eq!(lines[0], border);
        assert_eq!(lines[21], border);
        assert_eq!(lines[22], border);
        assert_ne!(lines[23], border);
        assert_eq!(lines.last().copied(), Some(border.as_str()));
    }

    #[test]
    fn test_wide_rows_are_cut_off() {
        let scene = filled(70, 1, 'T');
        let dump = render_dump(&scene, &DumpLayout::default()).unwrap();
        let row = dump.lines().nth(1).unwrap();
        assert_eq!(row.chars().filter(|&c| c == 'T').count(), 60);
        // 70 is not a multiple of the block width
        assert_eq!(dump.lines().last().unwrap().len(), 26);
    }

    #[test]
    fn test_write_dump_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated_world.txt");
        let scene = filled(3, 2, 'M');

        write_dump(&path, &scene, &DumpLayout::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_dump(&scene, &DumpLayout::default()).unwrap());
    }

    #[test]
    fn test_write_dump_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("world.txt");
        let scene = filled(3, 2, 'M');
        assert!(write_dump(&path, &scene, &DumpLayout::default()).is_err());
    }

    #[test]
    fn test_zero_layout_is_rejected() {
        let scene = filled(20, 3, 'M');
        for layout in [
            DumpLayout { block_width: 0, ..Default::default() },
            DumpLayout { blocks_per_line: 0, ..Default::default() },
            DumpLayout { rows_per_band: 0, ..Default::default() },
        ] {
            assert!(matches!(render_dump(&scene, &layout), Err(Error::Validation(_))));
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.txt");
        let layout = DumpLayout { rows_per_band: 0, ..Default::default() };
        assert!(matches!(write_dump(&path, &scene, &layout), Err(Error::Validation(_))));
        assert!(!path.exists());
    }
}
