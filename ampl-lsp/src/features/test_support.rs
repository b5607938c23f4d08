//! Shared fixtures for server and feature tests.

/// A small production model exercising every declaration shape.
pub fn sample_source() -> &'static str {
    "set Products;\n\
     param cost;\n\
     var Make;\n\
     maximize TotalProfit: cost * Make;\n\
     s.t. Capacity: Make <= 40;\n\
     function demand(p: Products, scale: Number)\n\
     type Matrix(rows: Number, cols: Number)\n"
}
