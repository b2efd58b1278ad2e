//! Fixed in-memory corpora for the region services.
//!
//! Entries carry an age rather than an absolute time; [`materialize`] turns
//! them into [`ResultItem`]s relative to the request time so freshness
//! bonuses stay meaningful for a long-running process.

use chrono::{DateTime, Utc};

use crate::types::ResultItem;

/// One static corpus document.
#[derive(Debug, Clone, Copy)]
pub struct CorpusEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub source: &'static str,
    pub url: &'static str,
    pub category: &'static str,
    pub age_hours: i64,
    pub tags: &'static [&'static str],
    /// Location hint, when the document names one.
    pub location: Option<&'static str>,
    /// Country label, carried as an extension field by the international corpus.
    pub country: Option<&'static str>,
}

/// Turn entries into fresh result items timestamped relative to `now`.
pub fn materialize(entries: &[CorpusEntry], provider: &str, now: DateTime<Utc>) -> Vec<ResultItem> {
    entries
        .iter()
        .map(|entry| {
            let mut item = ResultItem::new(
                format!("{provider}-{}", entry.slug),
                entry.title,
                entry.summary,
                entry.source,
                provider,
            )
            .with_url(entry.url)
            .with_category(entry.category)
            .with_timestamp(now - chrono::Duration::hours(entry.age_hours))
            .with_tags(entry.tags.iter().copied());
            if let Some(location) = entry.location {
                item = item.with_extra("location", location);
            }
            if let Some(country) = entry.country {
                item = item.with_extra("country", country);
            }
            item
        })
        .collect()
}

pub const LOCAL_CORPUS: &[CorpusEntry] = &[
    CorpusEntry {
        slug: "metro-primera-linea",
        title: "Avanza la construcción de la primera línea del Metro de Bogotá",
        summary: "La Empresa Metro reporta un avance del viaducto sobre la Avenida Primero de Mayo y nuevas estaciones en Kennedy.",
        source: "Alcaldía de Bogotá",
        url: "https://bogota.gov.co/mi-ciudad/movilidad/metro-primera-linea",
        category: "Transporte",
        age_hours: 3,
        tags: &["metro", "movilidad", "obras", "bogota"],
        location: Some("Bogotá"),
        country: None,
    },
    CorpusEntry {
        slug: "transmilenio-rutas-sur",
        title: "TransMilenio ajusta rutas troncales en el sur de la ciudad",
        summary: "Nuevas rutas fáciles conectarán Usme y Bosa con el centro durante las obras de la Avenida Caracas.",
        source: "TransMilenio S.A.",
        url: "https://www.transmilenio.gov.co/publicaciones/rutas-sur",
        category: "Transporte",
        age_hours: 20,
        tags: &["transmilenio", "transporte", "rutas"],
        location: Some("Bogotá"),
        country: None,
    },
    CorpusEntry {
        slug: "pico-y-placa-2025",
        title: "Pico y placa: horarios y excepciones para el segundo semestre",
        summary: "La Secretaría de Movilidad publica la rotación de placas y las exenciones para vehículos eléctricos y de carga.",
        source: "Secretaría Distrital de Movilidad",
        url: "https://www.movilidadbogota.gov.co/web/pico-y-placa",
        category: "Transporte",
        age_hours: 50,
        tags: &["movilidad", "vehiculos", "transporte"],
        location: Some("Bogotá"),
        country: None,
    },
    CorpusEntry {
        slug: "cicloruta-septima",
        title: "Nueva cicloruta de la carrera Séptima abre su segundo tramo",
        summary: "El tramo entre la calle 26 y la calle 72 suma 5 kilómetros de carril exclusivo para bicicletas.",
        source: "Instituto de Desarrollo Urbano",
        url: "https://www.idu.gov.co/page/cicloruta-septima",
        category: "Transporte",
        age_hours: 120,
        tags: &["bicicleta", "cicloruta", "bogota"],
        location: None,
        country: None,
    },
    CorpusEntry {
        slug: "vacunacion-influenza",
        title: "Jornada distrital de vacunación contra la influenza",
        summary: "Más de 300 puntos de vacunación gratuita atenderán a adultos mayores y niños durante el fin de semana.",
        source: "Secretaría Distrital de Salud",
        url: "https://www.saludcapital.gov.co/vacunacion-influenza",
        category: "Salud",
        age_hours: 5,
        tags: &["salud", "vacunacion", "influenza"],
        location: Some("Bogotá"),
        country: None,
    },
    CorpusEntry {
        slug: "hospital-usme",
        title: "Hospital de Usme amplía su servicio de urgencias",
        summary: "La subred sur habilita 40 camas adicionales y un nuevo pabellón pediátrico.",
        source: "Subred Integrada de Servicios de Salud Sur",
        url: "https://www.subredsur.gov.co/noticias/hospital-usme-urgencias",
        category: "Salud",
        age_hours: 70,
        tags: &["salud", "hospital", "usme", "bogota"],
        location: None,
        country: None,
    },
    CorpusEntry {
        slug: "presupuesto-concejo",
        title: "Concejo de Bogotá aprueba el presupuesto distrital",
        summary: "El presupuesto prioriza transporte, educación y seguridad, con recursos para el metro y nuevos colegios.",
        source: "Concejo de Bogotá",
        url: "https://concejodebogota.gov.co/presupuesto-distrital",
        category: "Politica",
        age_hours: 30,
        tags: &["concejo", "presupuesto", "politica"],
        location: Some("Bogotá"),
        country: None,
    },
    CorpusEntry {
        slug: "colegios-jornada-unica",
        title: "Veinte colegios distritales pasan a jornada única",
        summary: "La Secretaría de Educación amplía la jornada escolar con alimentación y actividades culturales.",
        source: "Secretaría de Educación del Distrito",
        url: "https://www.educacionbogota.edu.co/portal_institucional/jornada-unica",
        category: "Educacion",
        age_hours: 96,
        tags: &["educacion", "colegios", "bogota"],
        location: None,
        country: None,
    },
    CorpusEntry {
        slug: "calidad-aire-alerta",
        title: "Alerta amarilla por calidad del aire en el suroccidente",
        summary: "La Secretaría de Ambiente recomienda reducir actividades al aire libre en Kennedy, Bosa y Puente Aranda.",
        source: "Secretaría Distrital de Ambiente",
        url: "https://www.ambientebogota.gov.co/alerta-calidad-aire",
        category: "Medio Ambiente",
        age_hours: 2,
        tags: &["ambiente", "aire", "alerta"],
        location: Some("Bogotá"),
        country: None,
    },
    CorpusEntry {
        slug: "seguridad-transmilenio",
        title: "Refuerzan la seguridad en estaciones de TransMilenio",
        summary: "Mil policías adicionales acompañarán las estaciones con más denuncias de hurto en hora pico.",
        source: "Secretaría de Seguridad, Convivencia y Justicia",
        url: "https://scj.gov.co/noticias/seguridad-transmilenio",
        category: "Seguridad",
        age_hours: 12,
        tags: &["seguridad", "transmilenio", "bogota"],
        location: None,
        country: None,
    },
    CorpusEntry {
        slug: "empleo-feria",
        title: "Feria de empleo ofrece 3.000 vacantes en la capital",
        summary: "Empresas de servicios, construcción y tecnología participan en la feria organizada por Desarrollo Económico.",
        source: "Secretaría de Desarrollo Económico",
        url: "https://www.desarrolloeconomico.gov.co/feria-empleo",
        category: "Economia",
        age_hours: 40,
        tags: &["empleo", "economia", "bogota"],
        location: None,
        country: None,
    },
    CorpusEntry {
        slug: "metro-medellin-extension",
        title: "Metro de Medellín estudia extensión hacia el norte",
        summary: "La empresa de transporte del Valle de Aburrá evalúa una nueva línea de tranvía.",
        source: "El Colombiano",
        url: "https://www.elcolombiano.com/antioquia/metro-extension-norte",
        category: "Transporte",
        age_hours: 8,
        tags: &["metro", "medellin", "transporte"],
        location: Some("Medellín"),
        country: None,
    },
    CorpusEntry {
        slug: "reforma-pensional-nacional",
        title: "Senado debate la reforma pensional",
        summary: "La discusión nacional sobre pensiones entra en su tercer debate en el Congreso de la República.",
        source: "Congreso de la República",
        url: "https://www.senado.gov.co/reforma-pensional",
        category: "Politica",
        age_hours: 26,
        tags: &["congreso", "pensiones", "politica"],
        location: None,
        country: None,
    },
];

pub const INTERNATIONAL_CORPUS: &[CorpusEntry] = &[
    CorpusEntry {
        slug: "un-urban-mobility",
        title: "UN report calls for sustainable urban mobility in Latin America",
        summary: "The United Nations highlights bus rapid transit systems such as Bogotá's TransMilenio as models for growing cities.",
        source: "United Nations",
        url: "https://news.un.org/en/story/urban-mobility-latin-america",
        category: "international",
        age_hours: 10,
        tags: &["transport", "cities", "mobility"],
        location: None,
        country: Some("Global"),
    },
    CorpusEntry {
        slug: "who-air-quality",
        title: "WHO updates air quality guidelines for major cities",
        summary: "New health guidance lowers recommended exposure levels for fine particulate matter.",
        source: "World Health Organization",
        url: "https://www.who.int/news/air-quality-guidelines",
        category: "health",
        age_hours: 4,
        tags: &["health", "air", "pollution"],
        location: None,
        country: Some("Global"),
    },
    CorpusEntry {
        slug: "world-bank-colombia-growth",
        title: "World Bank revises Colombia growth outlook",
        summary: "The bank expects moderate growth driven by infrastructure investment and lower inflation.",
        source: "World Bank",
        url: "https://www.worldbank.org/en/news/colombia-outlook",
        category: "economics",
        age_hours: 30,
        tags: &["economy", "colombia", "growth"],
        location: None,
        country: Some("Colombia"),
    },
    CorpusEntry {
        slug: "reuters-latam-elections",
        title: "Latin American elections reshape regional politics",
        summary: "Analysts review the outcome of presidential elections across the region and their policy impact.",
        source: "Reuters",
        url: "https://www.reuters.com/world/americas/latam-elections",
        category: "politics",
        age_hours: 22,
        tags: &["politics", "elections", "latam"],
        location: None,
        country: Some("Global"),
    },
    CorpusEntry {
        slug: "bbc-climate-andes",
        title: "Andean glaciers shrinking faster than expected",
        summary: "Scientists warn that climate change threatens water supply for cities including Bogotá and Lima.",
        source: "BBC News",
        url: "https://www.bbc.com/news/science-environment-andes-glaciers",
        category: "environment",
        age_hours: 60,
        tags: &["climate", "water", "environment"],
        location: None,
        country: Some("Colombia"),
    },
    CorpusEntry {
        slug: "tech-digital-government",
        title: "Digital government services expand across the region",
        summary: "Cities adopt online permits and open data portals to improve transparency.",
        source: "TechCrunch",
        url: "https://techcrunch.com/digital-government-latam",
        category: "technology",
        age_hours: 90,
        tags: &["technology", "government", "open data"],
        location: None,
        country: Some("Global"),
    },
    CorpusEntry {
        slug: "unesco-education-report",
        title: "UNESCO report on school attendance after the pandemic",
        summary: "Education systems recover attendance levels, but learning gaps persist in urban peripheries.",
        source: "UNESCO",
        url: "https://www.unesco.org/en/articles/school-attendance-report",
        category: "education",
        age_hours: 150,
        tags: &["education", "schools"],
        location: None,
        country: Some("Global"),
    },
    CorpusEntry {
        slug: "copa-america-bogota",
        title: "Bogotá bids to host Copa América matches",
        summary: "The city proposes El Campín stadium as a venue for the upcoming football tournament.",
        source: "ESPN",
        url: "https://www.espn.com/soccer/copa-america-bogota",
        category: "sports",
        age_hours: 18,
        tags: &["football", "sports", "bogota"],
        location: None,
        country: Some("Colombia"),
    },
    CorpusEntry {
        slug: "festival-iberoamericano-teatro",
        title: "Ibero-American Theatre Festival returns to Bogotá",
        summary: "More than 40 international companies will perform across the city during the festival.",
        source: "The Guardian",
        url: "https://www.theguardian.com/stage/bogota-theatre-festival",
        category: "culture",
        age_hours: 45,
        tags: &["culture", "theatre", "festival"],
        location: None,
        country: Some("Colombia"),
    },
];
