use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::file::Groups;

/// Build a table with one row per group.
pub fn build(groups: &Groups) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Manifest").add_attribute(Attribute::Bold),
            Cell::new("Lock files").add_attribute(Attribute::Bold),
            Cell::new("Format").add_attribute(Attribute::Bold),
        ]);

    for group in groups {
        let manifest = match group.manifest_file() {
            Some(manifest) => Cell::new(manifest),
            None => Cell::new("—").fg(Color::DarkGrey),
        };
        let lock_files = if group.has_lock_files() {
            Cell::new(group.lock_files().join("\n"))
        } else {
            Cell::new("—").fg(Color::DarkGrey)
        };

        table.add_row(vec![
            manifest,
            lock_files,
            Cell::new(group.format().name()).fg(Color::Cyan),
        ]);
    }

    table
}

pub fn render(groups: &Groups) {
    println!("{}", build(groups));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::format::{builtin_formats, compile_all};
    use crate::file::Finder;

    #[test]
    fn test_one_row_per_group() {
        let finder = Finder::new(compile_all(&builtin_formats()).unwrap(), &[]).unwrap();
        let groups = finder.group_paths(&["/a/go.mod", "/a/go.sum", "/b/Cargo.lock"], false);

        let table = build(&groups);
        assert_eq!(table.row_iter().count(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("/a/go.mod"));
        assert!(rendered.contains("/b/Cargo.lock"));
        assert!(rendered.contains("cargo"));
    }
}
