// Déclare les modules principaux de la crate
pub mod context;
pub mod creation;
pub mod graph;
pub mod ops;
pub mod tensor;
pub mod tensor_data;

// Declare supporting modules
pub mod buffer;
pub mod device;
pub mod types;
pub mod utils;

// Ré-exporte les types principaux pour qu'ils soient accessibles directement
// via `manipurust_core::Tensor`, etc.
pub use context::{get_context, set_context, Context, GraphScope};
pub use device::StorageDevice;
pub use graph::{AttrValue, Graph, OperationNode};
pub use ops::manipulation::{flip_op, roll_op, Dims, Shifts};
pub use ops::view::reshape_op;
pub use tensor::Tensor;
pub use types::DType;
// Re-export traits required by public functions/structs
pub use num_traits;

pub mod error;
pub use error::ManipuRustError;
