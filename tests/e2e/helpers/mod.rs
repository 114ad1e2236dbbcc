
pub use mock_service::{fake_audio, spawn_mock_service};
pub use players::{FailingPlayer, RecordingPlayer};
