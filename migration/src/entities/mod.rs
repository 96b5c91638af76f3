pub mod banner;
pub mod group;
pub mod rotation;
pub mod slot;

pub use banner::Entity as BannerEntity;
pub use group::Entity as GroupEntity;
pub use rotation::Entity as RotationEntity;
pub use slot::Entity as SlotEntity;
