//! Tests for `download` argument parsing.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_download_minimal() {
    match parse(&["vkad", "download", "-1_2"]) {
        CliCommand::Download {
            album,
            token,
            folder,
            settings,
        } => {
            assert_eq!(album, "-1_2");
            assert!(token.is_none());
            assert!(folder.is_none());
            assert!(settings.is_none());
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_all_flags() {
    match parse(&[
        "vkad",
        "download",
        "https://vk.com/album-1_2",
        "--token",
        "abc",
        "--folder",
        "/tmp/photos",
        "--settings",
        "/etc/vkad.cfg",
    ]) {
        CliCommand::Download {
            album,
            token,
            folder,
            settings,
        } => {
            assert_eq!(album, "https://vk.com/album-1_2");
            assert_eq!(token.as_deref(), Some("abc"));
            assert_eq!(folder.as_deref(), Some("/tmp/photos"));
            assert_eq!(settings, Some(PathBuf::from("/etc/vkad.cfg")));
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_requires_album() {
    assert!(Cli::try_parse_from(["vkad", "download"]).is_err());
}
