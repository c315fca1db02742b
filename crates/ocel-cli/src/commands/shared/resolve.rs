use ocel_config::OcelConfig;
use ocel_core::VolumePath;

/// Volume components given on the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct VolumeFlags<'a> {
    pub catalog: Option<&'a str>,
    pub schema: Option<&'a str>,
    pub volume: Option<&'a str>,
    pub file_name: Option<&'a str>,
}

/// The source URL: the flag, else `source.url`.
pub fn source_url(flag: Option<&str>, config: &OcelConfig) -> anyhow::Result<String> {
    ocel_config::require("source.url", flag, &config.source.url)
        .inspect_err(|error| tracing::error!(%error, "no source url"))
        .map_err(anyhow::Error::from)
}

/// Resolve the volume file: a full `file_path` under the configured root, or
/// the component flags, each falling back to the `volume` config section.
pub fn volume_path(
    file_path: Option<&str>,
    flags: VolumeFlags<'_>,
    config: &OcelConfig,
) -> anyhow::Result<VolumePath> {
    let volume = &config.volume;
    let resolved = match file_path {
        Some(path) => VolumePath::parse(&volume.root, path),
        None => VolumePath::from_parts(
            &volume.root,
            pick(flags.catalog, &volume.catalog),
            pick(flags.schema, &volume.schema),
            pick(flags.volume, &volume.volume),
            pick(flags.file_name, &volume.file_name),
        ),
    };
    resolved
        .inspect_err(|error| tracing::error!(%error, "could not resolve volume path"))
        .map_err(anyhow::Error::from)
}

fn pick<'a>(flag: Option<&'a str>, configured: &'a str) -> Option<&'a str> {
    flag.filter(|value| !value.is_empty()).or(Some(configured))
}
