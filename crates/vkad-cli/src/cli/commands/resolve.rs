//! `vkad resolve` – show what an album reference resolves to.

use anyhow::Result;
use vkad_core::album_ref;

pub fn run_resolve(album: &str) -> Result<()> {
    let r = album_ref::resolve(album)?;
    println!("owner_id: {}", r.owner_id);
    println!("album_id: {}", r.album_id);
    Ok(())
}
