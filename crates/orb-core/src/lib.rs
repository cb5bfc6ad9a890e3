pub mod bus;
pub mod constants;
pub mod controller;
pub mod dock;
pub mod error;
pub mod host;
pub mod noise;
pub mod particles;
pub mod schedule;
pub mod state;
pub mod surface;

pub use bus::*;
pub use controller::*;
pub use dock::*;
pub use error::*;
pub use host::*;
pub use self::noise::*;
pub use particles::*;
pub use schedule::*;
pub use state::*;
pub use surface::*;
