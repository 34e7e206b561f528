// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod editor;
pub mod error;
pub mod forms;
pub mod ids;
pub mod model;
pub mod recommend;
pub mod session;
pub mod store;

pub use editor::*;
pub use error::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use recommend::*;
pub use session::*;
pub use store::*;
