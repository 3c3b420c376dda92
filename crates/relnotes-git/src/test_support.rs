//! Throwaway repositories for tests

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

use crate::repository::GitRepo;

pub(crate) struct TestRepo {
    pub temp: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        Self { temp, repo }
    }

    /// Create a commit with an empty tree without moving any reference
    pub fn commit(&self, message: &str, parents: &[Oid], time: i64) -> Oid {
        let sig = Signature::new("Test", "test@example.com", &Time::new(time, 0)).unwrap();
        let tree_id = self.repo.treebuilder(None).unwrap().write().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let parents: Vec<_> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).unwrap())
            .collect();
        let parent_refs: Vec<_> = parents.iter().collect();
        self.repo
            .commit(None, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    /// Create a linear chain of commits, one second apart
    pub fn chain(&self, messages: &[&str], parent: Option<Oid>, start_time: i64) -> Vec<Oid> {
        let mut oids = Vec::new();
        let mut parent = parent;
        for (i, message) in messages.iter().enumerate() {
            let parents: Vec<Oid> = parent.into_iter().collect();
            let oid = self.commit(message, &parents, start_time + i as i64);
            oids.push(oid);
            parent = Some(oid);
        }
        oids
    }

    /// Point a branch at a commit and make it HEAD
    pub fn set_branch(&self, name: &str, oid: Oid) {
        let refname = format!("refs/heads/{}", name);
        self.repo.reference(&refname, oid, true, "test").unwrap();
        self.repo.set_head(&refname).unwrap();
    }

    pub fn git(&self) -> GitRepo {
        GitRepo::open(self.temp.path()).unwrap()
    }
}
