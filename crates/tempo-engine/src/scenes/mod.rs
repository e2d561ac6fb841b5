pub mod card_dealer;
pub mod dialogue;
pub mod director;
pub mod flame;

pub use card_dealer::CardDealerScene;
pub use dialogue::DialogueScene;
pub use director::{ActiveScene, SceneDirector, SceneKind};
pub use flame::FlameScene;
