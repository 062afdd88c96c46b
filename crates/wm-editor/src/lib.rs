pub mod convert;
pub mod history;
pub mod input;
pub mod processing;
pub mod session;
pub mod shortcuts;
pub mod tools;

pub use convert::{ConversionSession, ConvertError, ConvertRequest, TargetFormat};
pub use history::HistoryLog;
pub use input::{InputEvent, Modifiers};
pub use processing::{DataUrl, InpaintRequest, PixelRect, context_window, mask_rects};
pub use session::{EditorSession, ImageDocument};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use tools::{RegionTool, ToolOutcome, ToolState};
