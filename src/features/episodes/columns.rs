//! Episodes Columns

use crate::components::data_table::Column;
use crate::domain::Episode;

pub fn episode_columns() -> Vec<Column<Episode>> {
    vec![
        Column::new("id", "ID").fixed_width(5),
        Column::new("name", "Name")
            .flex_width(Some(24), Some(40))
            .filterable(),
        Column::new("air_date", "Air Date").fixed_width(18).sortable(),
        Column::new("episode", "Episode Code").fixed_width(12),
        Column::new("characterCount", "Characters").fixed_width(10),
    ]
}
