use async_trait::async_trait;
use meter_core::AddressCandidate;
use meter_core::ports::{AddressSearch, SearchError};

const PLACES: &[(f64, f64, &str, &str)] = &[
    (38.7742, -9.1342, "Aeroporto Humberto Delgado, Lisboa", "pt"),
    (38.7139, -9.1334, "Rossio, Lisboa", "pt"),
    (38.6916, -9.2160, "Torre de Belém, Lisboa", "pt"),
    (38.7075, -9.1364, "Praça do Comércio, Lisboa", "pt"),
    (38.7369, -9.1427, "Saldanha, Lisboa", "pt"),
    (38.7681, -9.0940, "Parque das Nações, Lisboa", "pt"),
    (38.7223, -9.1393, "Avenida da Liberdade, Lisboa", "pt"),
    (38.7058, -9.1607, "Santos, Lisboa", "pt"),
    (38.7130, -9.1300, "Castelo de São Jorge, Lisboa", "pt"),
    (38.7566, -9.1555, "Estádio José Alvalade, Lisboa", "pt"),
    (38.7436, -9.1304, "Estação de Santa Apolónia, Lisboa", "pt"),
    (38.7107, -9.1456, "Chiado, Lisboa", "pt"),
    (41.1579, -8.6291, "Avenida dos Aliados, Porto", "pt"),
    (40.4168, -3.7038, "Puerta del Sol, Madrid", "es"),
];

/// Offline [`AddressSearch`] over a small built-in list of places.
///
/// Matches when every word of the query appears in the place name, ignoring
/// case. Used when no geocoding service is compiled in.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer;

#[async_trait]
impl AddressSearch for Gazetteer {
    async fn search(
        &self,
        query: &str,
        country: &str,
        limit: usize,
    ) -> Result<Vec<AddressCandidate>, SearchError> {
        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        Ok(PLACES
            .iter()
            .filter(|(_, _, _, cc)| country.is_empty() || cc.eq_ignore_ascii_case(country))
            .filter(|(_, _, name, _)| {
                let name = name.to_lowercase();
                words.iter().all(|w| name.contains(w.as_str()))
            })
            .take(limit)
            .map(|&(latitude, longitude, name, _)| AddressCandidate {
                latitude,
                longitude,
                display_name: name.to_string(),
            })
            .collect())
    }
}
