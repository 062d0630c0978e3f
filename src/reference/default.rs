use crate::reference::{Registry, Repository};

lazy_static! {
    static ref DOCKER_HUB: DefaultRegistry = DefaultRegistry::docker_hub();
}

/// Settings for the registry assumed when an image name doesn't include one
///
/// If you don't need the additional options, you can convert a plain
/// [Registry] [Into] a [DefaultRegistry]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultRegistry {
    /// Canonical name of the registry, used in normalized image names
    pub host: Registry,
    /// This registry is also known under additional names, which normalize
    /// to `host`
    pub also_known_as: Vec<Registry>,
    /// Prefix for image repositories with only a single path component
    pub library_prefix: Option<Repository>,
}

impl From<Registry> for DefaultRegistry {
    fn from(host: Registry) -> Self {
        DefaultRegistry {
            host,
            also_known_as: vec![],
            library_prefix: None,
        }
    }
}

impl Default for DefaultRegistry {
    fn default() -> Self {
        DefaultRegistry::docker_hub()
    }
}

impl DefaultRegistry {
    /// Return the built-in Docker Hub settings
    ///
    /// Docker Hub is `docker.io`, historically also `index.docker.io`, and
    /// official images live under `library/`.
    pub fn docker_hub() -> Self {
        DefaultRegistry {
            host: Registry::parse("docker.io").expect("built-in registry"),
            also_known_as: vec![Registry::parse("index.docker.io").expect("built-in registry")],
            library_prefix: Some(Repository::parse("library").expect("built-in repository")),
        }
    }

    /// Shared instance of [DefaultRegistry::docker_hub]
    pub fn global() -> &'static DefaultRegistry {
        &DOCKER_HUB
    }

    /// Check whether a particular registry is considered default under these
    /// settings
    ///
    /// Returns true if the given registry is None or if it matches either
    /// `host` or any of the `also_known_as` names.
    pub fn is_default(&self, registry: Option<&Registry>) -> bool {
        match registry {
            None => true,
            Some(registry) => registry == &self.host || self.also_known_as.contains(registry),
        }
    }

    /// Is this the canonical host name of the default registry?
    pub fn is_host(&self, host: &str) -> bool {
        self.host.as_str() == host
    }

    /// The library prefix as a string, if these settings have one
    pub fn library_prefix_str(&self) -> Option<&str> {
        self.library_prefix.as_ref().map(Repository::as_str)
    }

    /// Determine the canonical registry and repository path for an image
    ///
    /// Images on any other registry pass through unchanged. Images on the
    /// default registry, under any of its names, get the canonical `host` and
    /// single-component paths get the `library_prefix`.
    pub fn canonicalize(
        &self,
        registry: Option<&Registry>,
        repository: &Repository,
    ) -> (Registry, Repository) {
        match registry {
            Some(registry) if !self.is_default(Some(registry)) => {
                (registry.clone(), repository.clone())
            }
            _ => {
                let repository = match &self.library_prefix {
                    Some(prefix) if repository.is_single_segment() => prefix.join(repository),
                    _ => repository.clone(),
                };
                (self.host.clone(), repository)
            }
        }
    }
}
