//! `encode` and `decode` handlers.

use mediastash::{decode_data_uri, encode_data_uri};
use std::path::Path;

/// Print the data URI of `file`.
pub async fn encode_file(file: &Path, mimetype: &str) -> Result<(), Box<dyn std::error::Error>> {
    let data = tokio::fs::read(file).await?;
    tracing::debug!(path = %file.display(), size = data.len(), "Read file");
    println!("{}", encode_data_uri(mimetype, &data));
    Ok(())
}

/// Write the payload of `uri` to `output`.
pub async fn decode_file(uri: &str, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let decoded = decode_data_uri(uri)?;
    tokio::fs::write(output, &decoded.data).await?;
    println!(
        "Wrote {} bytes of {} to {}",
        decoded.data.len(),
        decoded.mimetype,
        output.display()
    );
    Ok(())
}
