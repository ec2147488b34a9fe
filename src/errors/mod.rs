// Copyright (c) ScaleFS LLC; used with permission
// Licensed under the MIT License

mod setup_api_error;
pub use setup_api_error::SetupApiError;
