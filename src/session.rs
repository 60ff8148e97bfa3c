//! Session state and control flow
//!
//! [`SyncSession`] is the explicit application-state struct: the cached
//! replicas of both collections, the pending form drafts, the session
//! provenance tracker and the admin gate, owned together and mutated by
//! exactly one logical actor.
//!
//! Consistency contract: mutations are not reflected in the cached
//! replicas until the subsequent list refresh completes. Between the
//! mutation and that refresh the caches are stale but never corrupt.
//! Every mutating method takes `&mut self`, so operations are
//! serialized by construction and overlapping refreshes cannot race.

use crate::client::ResourceClient;
use crate::gate::AccessGate;
use crate::models::{Collection, CreativityPathRecord, PathDraft, RecordId, UserDraft, UserRecord};
use crate::provenance::ProvenanceTracker;
use crate::Result;
use tracing::{info, warn};

/// Fallback label for a path row whose user reference is empty
const UNKNOWN_USER_LABEL: &str = "Unknown";

/// Outcome of a bulk cleanup of session-created records
///
/// Partial failure is expected and exposed: failed ids stay tracked
/// (and stay in the backend), successfully deleted ids are gone from
/// both.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub users_deleted: usize,
    pub paths_deleted: usize,
    /// Identities whose delete request failed, still tracked
    pub failed: Vec<(Collection, RecordId)>,
}

impl CleanupReport {
    pub fn attempted(&self) -> usize {
        self.users_deleted + self.paths_deleted + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A creativity path joined against the cached user list for display
#[derive(Debug)]
pub struct PathRow<'a> {
    pub path: &'a CreativityPathRecord,
    /// Resolved user name, the raw identity if the reference dangles,
    /// or "Unknown" if the reference is empty
    pub user_label: String,
}

/// Client session owning caches, drafts, provenance and the admin gate
pub struct SyncSession {
    client: ResourceClient,
    users: Vec<UserRecord>,
    paths: Vec<CreativityPathRecord>,
    /// Pending user form input; cleared only on successful create
    pub user_form: UserDraft,
    /// Pending path form input; cleared only on successful create
    pub path_form: PathDraft,
    provenance: ProvenanceTracker,
    gate: AccessGate,
}

impl SyncSession {
    pub fn new(client: ResourceClient) -> Self {
        Self {
            client,
            users: Vec::new(),
            paths: Vec::new(),
            user_form: UserDraft::default(),
            path_form: PathDraft::default(),
            provenance: ProvenanceTracker::new(),
            gate: AccessGate::new(),
        }
    }

    /// Cached user list, in backend display order
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    /// Cached creativity path list, in backend display order
    pub fn paths(&self) -> &[CreativityPathRecord] {
        &self.paths
    }

    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    pub fn grant_admin(&mut self) {
        self.gate.grant();
    }

    pub fn revoke_admin(&mut self) {
        self.gate.revoke();
    }

    pub fn is_admin(&self) -> bool {
        self.gate.is_admin()
    }

    pub fn is_session_created(&self, collection: Collection, id: &RecordId) -> bool {
        self.provenance.is_session_created(collection, id)
    }

    pub fn is_highlighted(&self, collection: Collection, id: &RecordId) -> bool {
        self.provenance.is_highlighted(collection, id)
    }

    /// Replace the cached user list with the backend's current contents
    ///
    /// On failure the previous cache is left untouched.
    pub async fn refresh_users(&mut self) -> Result<()> {
        self.users = self.client.list_users().await?;
        Ok(())
    }

    /// Replace the cached path list with the backend's current contents
    ///
    /// On failure the previous cache is left untouched.
    pub async fn refresh_paths(&mut self) -> Result<()> {
        self.paths = self.client.list_paths().await?;
        Ok(())
    }

    /// Refresh both collections, attempting each regardless of the
    /// other's outcome; the first error (if any) is returned
    pub async fn refresh_all(&mut self) -> Result<()> {
        let users = self.client.list_users().await;
        let paths = self.client.list_paths().await;

        let mut first_err = None;
        match users {
            Ok(records) => self.users = records,
            Err(e) => first_err = Some(e),
        }
        match paths {
            Ok(records) => self.paths = records,
            Err(e) => {
                if first_err.is_some() {
                    warn!(error = %e, "path refresh also failed");
                } else {
                    first_err = Some(e);
                }
            }
        }

        match first_err {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    /// Submit the pending user form
    ///
    /// On success the form is cleared, the assigned identity is
    /// recorded as session-created and the cache is resynchronized from
    /// the backend. On failure the pending input is preserved.
    pub async fn submit_user(&mut self) -> Result<UserRecord> {
        self.user_form.validate()?;

        let created = self.client.create_user(&self.user_form).await?;
        info!(id = %created.id, name = %created.name, "user created");

        self.provenance
            .record_created(Collection::Users, created.id.clone());
        self.user_form = UserDraft::default();
        log_refresh_failure(self.refresh_users().await);

        Ok(created)
    }

    /// Submit the pending path form; same contract as [`submit_user`]
    ///
    /// [`submit_user`]: SyncSession::submit_user
    pub async fn submit_path(&mut self) -> Result<CreativityPathRecord> {
        self.path_form.validate()?;

        let created = self.client.create_path(&self.path_form).await?;
        info!(id = %created.id, user_id = %created.user_id, "creativity path created");

        self.provenance
            .record_created(Collection::CreativityPaths, created.id.clone());
        self.path_form = PathDraft::default();
        log_refresh_failure(self.refresh_paths().await);

        Ok(created)
    }

    /// Delete a user by identity (admin-gated)
    pub async fn delete_user(&mut self, id: &RecordId) -> Result<()> {
        self.delete_record(Collection::Users, id).await
    }

    /// Delete a creativity path by identity (admin-gated)
    pub async fn delete_path(&mut self, id: &RecordId) -> Result<()> {
        self.delete_record(Collection::CreativityPaths, id).await
    }

    async fn delete_record(&mut self, collection: Collection, id: &RecordId) -> Result<()> {
        if !self.gate.is_admin() {
            return Err(crate::Error::AdminRequired);
        }

        self.client.delete(collection, id).await?;
        info!(collection = %collection, id = %id, "record deleted");

        self.provenance.forget(collection, id);
        let refreshed = match collection {
            Collection::Users => self.refresh_users().await,
            Collection::CreativityPaths => self.refresh_paths().await,
        };
        log_refresh_failure(refreshed);

        Ok(())
    }

    /// Delete every record created by this session
    ///
    /// Not admin-gated: undoing one's own additions needs no elevated
    /// mode. Deletes are issued sequentially, paths
    /// before users so that no user deletion can orphan a still-tracked
    /// path. Each failure leaves that id tracked and in the backend;
    /// both collections are refreshed afterwards regardless of
    /// outcomes. With nothing tracked this issues zero requests.
    pub async fn undo_session_additions(&mut self) -> CleanupReport {
        let mut report = CleanupReport::default();
        if self.provenance.is_empty() {
            return report;
        }

        for id in self.provenance.tracked(Collection::CreativityPaths) {
            match self.client.delete(Collection::CreativityPaths, &id).await {
                Ok(()) => {
                    self.provenance.forget(Collection::CreativityPaths, &id);
                    report.paths_deleted += 1;
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "cleanup delete failed, id stays tracked");
                    report.failed.push((Collection::CreativityPaths, id));
                }
            }
        }

        for id in self.provenance.tracked(Collection::Users) {
            match self.client.delete(Collection::Users, &id).await {
                Ok(()) => {
                    self.provenance.forget(Collection::Users, &id);
                    report.users_deleted += 1;
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "cleanup delete failed, id stays tracked");
                    report.failed.push((Collection::Users, id));
                }
            }
        }

        info!(
            users_deleted = report.users_deleted,
            paths_deleted = report.paths_deleted,
            failed = report.failed.len(),
            "session cleanup finished"
        );
        log_refresh_failure(self.refresh_all().await);

        report
    }

    /// Cached paths joined against the cached user list for display
    ///
    /// A dangling user reference never fails the listing; it renders as
    /// the raw identity (or "Unknown" when empty).
    pub fn path_rows(&self) -> Vec<PathRow<'_>> {
        self.paths
            .iter()
            .map(|path| PathRow {
                path,
                user_label: self.user_label(&path.user_id),
            })
            .collect()
    }

    fn user_label(&self, user_id: &RecordId) -> String {
        if let Some(user) = self.users.iter().find(|u| &u.id == user_id) {
            return user.name.clone();
        }
        if user_id.is_empty() {
            UNKNOWN_USER_LABEL.to_string()
        } else {
            user_id.to_string()
        }
    }
}

fn log_refresh_failure(outcome: Result<()>) {
    if let Err(e) = outcome {
        // The mutation itself succeeded; the cache stays stale until
        // the next refresh.
        warn!(error = %e, "post-mutation refresh failed, cache left untouched");
    }
}
