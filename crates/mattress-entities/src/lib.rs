//! Entity surface for tracked mattresses
//!
//! Each instance exposes four read-only sensors (current side, last
//! flipped, current rotation, last rotated) and two buttons (flip,
//! rotate). Naming, unique ids, and device metadata are derived by free
//! functions from one description struct; state is only ever mutated
//! through the MattressInstance aggregate.

mod button;
mod description;
mod sensor;

pub use button::{buttons_for, ButtonKind, MattressButton};
pub use description::{
    button_description, sensor_description, sensor_label, DeviceInfo, EntityDescription,
    MANUFACTURER,
};
pub use sensor::{
    render_field, restore_sensors, sensors_for, MattressSensor, SensorDeviceClass,
};
