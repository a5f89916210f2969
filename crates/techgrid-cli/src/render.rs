use techgrid::core::models::catalog::ModuleCatalog;
use techgrid::core::models::grid::Grid;

const LABEL_WIDTH: usize = 4;

/// Renders a grid as an ASCII table, one row of cells per line.
///
/// Inactive cells show `####`, empty active cells `....`, and occupied cells
/// the first characters of the module id in uppercase. A trailing `*` marks a
/// supercharged cell.
pub fn render_grid(grid: &Grid, catalog: &ModuleCatalog) -> String {
    let mut rows = vec![String::new(); grid.height()];
    for cell in grid.cells() {
        let label = if !cell.active {
            "#".repeat(LABEL_WIDTH)
        } else if let Some(key) = cell.module {
            let id = catalog.get(key).map(|m| m.id.as_str()).unwrap_or("?");
            let short: String = id.chars().take(LABEL_WIDTH).collect();
            format!("{:<LABEL_WIDTH$}", short.to_uppercase())
        } else {
            ".".repeat(LABEL_WIDTH)
        };
        let marker = if cell.supercharged { '*' } else { ' ' };
        let row = &mut rows[cell.y];
        if !row.is_empty() {
            row.push(' ');
        }
        row.push_str(&label);
        row.push(marker);
    }
    rows.join("\n")
}
