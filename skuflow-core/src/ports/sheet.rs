// skuflow-core/src/ports/sheet.rs

// What the pipeline needs from the spreadsheet side, without knowing how the rows get there.
// The fetch step (Sheets API export) lives outside this crate; it only has to leave
// tables somewhere a `SheetSource` can read them.

use crate::domain::project::SheetKind;
use crate::domain::record::RawRow;
use crate::error::SkuflowError;

pub trait SheetSource: Send + Sync {
    /// Rows of one sheet, in source order. An unreadable sheet is fatal for the run.
    fn load(&self, kind: SheetKind) -> Result<Vec<RawRow>, SkuflowError>;
}
