//! Certificate reassembly against a simulated card

mod common;

use common::{SimulatedCard, certificate, eid_card, simulated};
use perso_eid::profiles::{IDEMIA_COSMO, THALES};
use perso_eid::{Error, FilePath, FormatError, SelectError, SelectMode};

const READ_BINARY: u8 = 0xB0;

#[test]
fn test_600_byte_certificate_takes_three_reads() {
    let cert = certificate(600, 7);
    let sim = SimulatedCard::for_profile(&IDEMIA_COSMO, [], cert.clone(), certificate(10, 1));
    let mut card = eid_card(&IDEMIA_COSMO, sim);

    let read = card.read_auth_certificate().unwrap();
    assert_eq!(read.as_ref(), cert.as_slice());

    let reads = simulated(&card).commands_with_ins(READ_BINARY);
    assert_eq!(
        reads,
        vec![
            &[0x00, 0xB0, 0x00, 0x00, 0x00][..],
            &[0x00, 0xB0, 0x01, 0x00, 0xFF][..],
            &[0x00, 0xB0, 0x01, 0xFF, 0x59][..],
        ]
    );
}

#[test]
fn test_assembly_matches_single_shot_content() {
    for len in [4, 5, 255, 256, 257, 511, 512, 1024, 1500, 4096, 0x10000] {
        let cert = certificate(len, len as u8);
        let sim = SimulatedCard::for_profile(&THALES, [], certificate(8, 0), cert.clone());
        let mut card = eid_card(&THALES, sim);

        let read = card.read_sign_certificate().unwrap();
        assert_eq!(read.len(), len, "length {len}");
        assert_eq!(read.as_ref(), cert.as_slice(), "content {len}");

        // Continuation reads never ask for more than 255 bytes
        let reads = simulated(&card).commands_with_ins(READ_BINARY);
        assert!(reads.iter().skip(1).all(|c| c[4] != 0x00));
        let expected_reads = 1 + len.saturating_sub(256).div_ceil(255);
        assert_eq!(reads.len(), expected_reads, "reads for {len}");
    }
}

#[test]
fn test_file_longer_than_declared_length() {
    // Trailing bytes after the DER structure are not part of the certificate
    let mut content = certificate(300, 3);
    content.extend_from_slice(&[0xFF; 100]);
    let sim = SimulatedCard::for_profile(&THALES, [], content.clone(), certificate(8, 0));
    let mut card = eid_card(&THALES, sim);

    let read = card.read_auth_certificate().unwrap();
    assert_eq!(read.as_ref(), &content[..300]);
}

#[test]
fn test_invalid_header_is_format_error() {
    for header in [[0x31, 0x82, 0x01, 0x00], [0x30, 0x81, 0x20, 0x00], [0x30, 0x83, 0x00, 0x01]] {
        let mut content = header.to_vec();
        content.resize(400, 0xAA);
        let sim = SimulatedCard::for_profile(&IDEMIA_COSMO, [], content, certificate(8, 0));
        let mut card = eid_card(&IDEMIA_COSMO, sim);

        let err = card.read_auth_certificate().unwrap_err();
        assert!(matches!(err, Error::Format(_)), "{err:?}");
        assert_eq!(simulated(&card).commands_with_ins(READ_BINARY).len(), 1);
    }
}

#[test]
fn test_file_shorter_than_declared_length() {
    let mut content = certificate(600, 9);
    content.truncate(300);
    let sim = SimulatedCard::for_profile(&THALES, [], content, certificate(8, 0));
    let mut card = eid_card(&THALES, sim);

    assert_eq!(
        card.read_auth_certificate().unwrap_err(),
        Error::Format(FormatError::PrematureEnd {
            expected: 600,
            received: 300
        })
    );
}

#[test]
fn test_unknown_path_is_select_error() {
    let sim = SimulatedCard::for_profile(&THALES, [], certificate(8, 0), certificate(8, 0));
    let mut card = eid_card(&THALES, sim);

    let err = card
        .read_certificate(&FilePath::new(SelectMode::PathFromMf, vec![0xAD, 0xF9, 0x34, 0x99]))
        .unwrap_err();
    assert!(matches!(err, Error::Select(SelectError::Status(_))));
    assert_eq!(err.status_word().map(|sw| sw.to_u16()), Some(0x6A82));
    assert!(simulated(&card).commands_with_ins(READ_BINARY).is_empty());
}
