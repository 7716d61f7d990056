//! Registry of supported card families

use hex_literal::hex;

use crate::constants::PERSO_ROW_BASE;
use crate::path::{FilePath, SelectMode};
use crate::profile::{CardProfile, DocumentNumberFile, PinKind, PinReference, RowAddressing};

const COSMO_8_ATR: &[u8] = &hex!("3BDB960080B1FE451F830012233F536549440F9000F1");
const COSMO_X_ATR: &[u8] = &hex!("3BDC960080B1FE451F830012233F54654944320F9000C3");
const COSMO_AID: &[u8] = &hex!("A000000077010800070000FE00000100");
const COSMO_DOCUMENT_NUMBER: &[u8] = &hex!("D003");
const COSMO_PERSO_DF: &[u8] = &hex!("5000");
const COSMO_AUTH_CERT: &[u8] = &hex!("3F00ADF13401");
const COSMO_SIGN_CERT: &[u8] = &hex!("3F00ADF2341F");
const COSMO_SIGN_ADF: &[u8] = &hex!("3F00ADF2");

const THALES_ATR: &[u8] = &hex!("3BFF9600008031FE438031B85365494464B085051012233F1D");
const THALES_AID: &[u8] = &hex!("A000000063504B43532D3135");
const THALES_PERSO_DF: &[u8] = &hex!("DFDD");
const THALES_AUTH_CERT: &[u8] = &hex!("ADF13411");
const THALES_SIGN_CERT: &[u8] = &hex!("ADF23421");

/// IDEMIA Cosmo 8.1, 8.2 and X
pub static IDEMIA_COSMO: CardProfile = CardProfile {
    name: "IDEMIA Cosmo",
    atrs: &[COSMO_8_ATR, COSMO_X_ATR],
    application: FilePath::from_static(SelectMode::Aid, COSMO_AID),
    document_number: Some(DocumentNumberFile {
        file: FilePath::from_static(SelectMode::ChildEf, COSMO_DOCUMENT_NUMBER),
        header_length: 2,
    }),
    personal_info: FilePath::from_static(SelectMode::ChildDf, COSMO_PERSO_DF),
    personal_info_base: PERSO_ROW_BASE,
    row_count: 16,
    row_addressing: RowAddressing::Linear,
    auth_cert: FilePath::from_static(SelectMode::PathFromCurrentDf, COSMO_AUTH_CERT),
    sign_cert: FilePath::from_static(SelectMode::PathFromCurrentDf, COSMO_SIGN_CERT),
    pins: [
        PinReference {
            kind: PinKind::Pin1,
            reference: 0x01,
            pad: 0xFF,
            pre_select: None,
        },
        PinReference {
            kind: PinKind::Pin2,
            reference: 0x85,
            pad: 0xFF,
            pre_select: Some(FilePath::from_static(
                SelectMode::PathFromCurrentDf,
                COSMO_SIGN_ADF,
            )),
        },
        PinReference {
            kind: PinKind::Puk,
            reference: 0x02,
            pad: 0xFF,
            pre_select: None,
        },
    ],
};

/// Thales eID applet
pub static THALES: CardProfile = CardProfile {
    name: "Thales",
    atrs: &[THALES_ATR],
    application: FilePath::from_static(SelectMode::Aid, THALES_AID),
    document_number: None,
    personal_info: FilePath::from_static(SelectMode::PathFromMf, THALES_PERSO_DF),
    personal_info_base: PERSO_ROW_BASE,
    row_count: 24,
    row_addressing: RowAddressing::TensOnesBcd,
    auth_cert: FilePath::from_static(SelectMode::PathFromMf, THALES_AUTH_CERT),
    sign_cert: FilePath::from_static(SelectMode::PathFromMf, THALES_SIGN_CERT),
    pins: [
        PinReference {
            kind: PinKind::Pin1,
            reference: 0x81,
            pad: 0x00,
            pre_select: None,
        },
        PinReference {
            kind: PinKind::Pin2,
            reference: 0x82,
            pad: 0x00,
            pre_select: None,
        },
        PinReference {
            kind: PinKind::Puk,
            reference: 0x83,
            pad: 0x00,
            pre_select: None,
        },
    ],
};

/// Every supported profile, in lookup order
pub fn registry() -> [&'static CardProfile; 2] {
    [&IDEMIA_COSMO, &THALES]
}
