pub mod artifact;
pub mod error;
pub mod features;
pub mod handle;
pub mod linear;
pub mod model;
pub mod tree;

pub use artifact::{FORMAT_VERSION, ModelArtifact, ModelSpec, load_model};
pub use error::{ArtifactError, PredictError};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
pub use handle::ModelHandle;
pub use linear::LinearRegressor;
pub use model::{ModelKind, ProfitModel};
pub use tree::{Aggregation, NodeId, RegressionTree, TreeEnsemble, TreeNode};
