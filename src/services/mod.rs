pub mod controller;
pub mod detail_page;
pub mod location;
pub mod message_bus;
pub mod navigation;
pub mod queue;

pub use controller::{BannerController, DEFAULT_DWELL};
pub use location::LocationProvider;
pub use message_bus::{MessageBus, Options, PublishReport, Subscription};
pub use navigation::NavigationMenu;
pub use queue::{NotificationQueue, QueueEvent};
