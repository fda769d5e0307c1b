//! Ready-made rule catalogs.
//!
//! - [`laptop`]: price brackets for laptops from 17 declared
//!   specifications (processor, memory, graphics, display, options).

pub mod laptop;
