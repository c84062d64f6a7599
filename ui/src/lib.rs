pub mod city_map_holder;
pub mod city_screen;
pub mod city_tile_group;

pub use city_map_holder::{new_shared_viewport, CityMapHolder, SharedViewport, ViewportTransform};
pub use city_screen::{BuyOffer, CityPickerInfo, CityScreen, TileTable, TutorialTrigger};
pub use city_tile_group::{CityTileGroup, StageSize, TileIcon};
