// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

mod driver_type;
pub use driver_type::DriverType;

mod reg_key_location;
pub use reg_key_location::{RegKeyScope, RegKeyType};
