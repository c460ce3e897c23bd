use super::error::EnvironmentError;
use super::model::Environment;

/// Resolves deployment environments from branch names.
pub struct EnvironmentRegistry;

impl EnvironmentRegistry {
    /// Resolve the environment for `branch_name`.
    ///
    /// The branch is compared against `trunk_name` case-insensitively, and
    /// the environment id is the lowercased branch so that `MAIN` and `main`
    /// share one ledger scope. Only the trunk retains its data on destroy;
    /// every other branch is fully removable.
    pub fn resolve(branch_name: &str, trunk_name: &str) -> Result<Environment, EnvironmentError> {
        let branch = branch_name.trim();
        if branch.is_empty() {
            return Err(EnvironmentError::Configuration(
                "Branch is required".to_string(),
            ));
        }

        let trunk = trunk_name.trim();
        if trunk.is_empty() {
            return Err(EnvironmentError::Configuration(
                "Trunk branch name is required".to_string(),
            ));
        }

        let id = branch.to_lowercase();
        let is_trunk = id == trunk.to_lowercase();

        tracing::info!(
            branch = branch,
            trunk = trunk,
            is_trunk = is_trunk,
            "Environment resolved"
        );

        Ok(Environment {
            id,
            is_trunk,
            retain_data_on_destroy: is_trunk,
        })
    }
}
