use tabled::{Table, settings::Style};

/// Consistent styling for all tables printed by mapctl
pub(crate) trait MapctlTable {
    fn styled(&mut self) -> &mut Self;
}

impl MapctlTable for Table {
    fn styled(&mut self) -> &mut Self {
        self.with(Style::psql())
    }
}
