use hickory_proto::rr::RecordType as HickoryRecordType;
use sluice_dns_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building messages)
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::Unknown(code) => HickoryRecordType::from(*code),
        }
    }

    /// Convert hickory RecordType → domain RecordType (for incoming messages)
    ///
    /// Codes without a named variant are carried as `Unknown(code)`.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        match hickory_type {
            HickoryRecordType::A => RecordType::A,
            HickoryRecordType::NS => RecordType::NS,
            HickoryRecordType::CNAME => RecordType::CNAME,
            HickoryRecordType::PTR => RecordType::PTR,
            HickoryRecordType::MX => RecordType::MX,
            HickoryRecordType::TXT => RecordType::TXT,
            HickoryRecordType::AAAA => RecordType::AAAA,
            other => RecordType::from_u16(u16::from(other)),
        }
    }

    /// True when records of this type can be converted to and from text values.
    pub fn is_supported(hickory_type: HickoryRecordType) -> bool {
        !matches!(Self::from_hickory(hickory_type), RecordType::Unknown(_))
    }
}
