// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod candidates;
pub mod dates;
pub mod model;
pub mod reminder;
pub mod state;
pub mod view;

pub use candidates::*;
pub use model::*;
pub use reminder::*;
pub use state::*;
pub use view::*;
