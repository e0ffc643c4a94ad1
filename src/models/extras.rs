use serde::Serialize;

/// Columns of the UCI files that are carried along but not used by the
/// filter or aggregation stages. Each one is optional since only the core
/// columns are required in an input file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassThroughColumns {
    pub instant: Option<u32>,
    pub yr: Option<u8>,
    pub mnth: Option<u8>,
    pub holiday: Option<u8>,
    pub weekday: Option<u8>,
    pub workingday: Option<u8>,
    pub atemp: Option<f64>,
    pub windspeed: Option<f64>,
    pub casual: Option<u32>,
    pub registered: Option<u32>,
}

impl PassThroughColumns {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
