//! Characters Columns

use crate::components::data_table::Column;
use crate::domain::Character;

/// Column definitions shared by both characters pages
pub fn character_columns() -> Vec<Column<Character>> {
    vec![
        Column::new("id", "ID").fixed_width(5),
        Column::new("name", "Character Name")
            .flex_width(Some(20), Some(32))
            .sortable()
            .filterable(),
        Column::new("status", "Status").filterable(),
        Column::new("species", "Species").filterable(),
        Column::new("gender", "Gender").filterable(),
        Column::new("origin.name", "Origin").flex_width(Some(18), Some(28)),
        Column::new("episodeCount", "Episodes").fixed_width(8).sortable(),
        Column::new("image", "Avatar").flex_width(None, Some(48)),
    ]
}
