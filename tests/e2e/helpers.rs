use git2::{IndexAddOption, Repository, Signature};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub binary_path: String,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary_path = env!("CARGO_BIN_EXE_repo-license-summary").to_string();

        Repository::init(dir.path()).expect("Failed to init repository");
        Self { dir, binary_path }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(path, content).expect("Failed to write file");
        self
    }

    /// Stage everything in the working copy and commit it.
    pub fn commit(&self) {
        let repo = Repository::open(self.dir.path()).expect("Failed to open repository");
        let mut index = repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");

        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_id).expect("Failed to find tree");
        let signature = Signature::now("Test", "test@example.com").expect("Failed to sign");

        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &signature, &signature, "snapshot", &tree, &parents)
            .expect("Failed to commit");
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .arg("--repository")
            .arg(self.dir.path())
            .arg("--color")
            .arg("never")
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run repo-license-summary")
    }

    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            eprintln!("STDOUT: {}", String::from_utf8_lossy(&output.stdout));
            eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
        }
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}
