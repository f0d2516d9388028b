//! Built-in course catalog.

use bisoshi_types::Course;

struct Entry {
    title: &'static str,
    description: &'static str,
    tags: [&'static str; 2],
    start_date: &'static str,
    rating: f32,
    reviews: u32,
    syllabus: [&'static str; 4],
    video: &'static str,
}

static ENTRIES: [Entry; 5] = [
    Entry {
        title: "Formalización y Cumplimiento Legal en el Sector Agroquímico",
        description: "Conoce las normativas y procesos legales para operar en el sector agroquímico.",
        tags: ["Legal", "Agroquímico"],
        start_date: "May 10",
        rating: 4.5,
        reviews: 15_200,
        syllabus: [
            "Requisitos legales para la formalización",
            "Normativa ambiental y de salud",
            "Licencias y permisos obligatorios",
            "Casos prácticos de cumplimiento legal",
        ],
        video: "https://www.youtube.com/embed/sTaTt-nl1vY",
    },
    Entry {
        title: "Inteligencia de Negocios para PYMES",
        description: "Descubre cómo usar datos y herramientas para mejorar la toma de decisiones en PYMES.",
        tags: ["PYMES", "Negocios"],
        start_date: "May 15",
        rating: 4.8,
        reviews: 22_300,
        syllabus: [
            "Introducción a la inteligencia de negocios",
            "Herramientas de análisis de datos",
            "Interpretación de dashboards",
            "Estrategias para la toma de decisiones basadas en datos",
        ],
        video: "https://www.youtube.com/embed/3yQ4OLUsNwc",
    },
    Entry {
        title: "Marketing y Ventas para Empresas de Agroquímicos",
        description: "Aprende estrategias efectivas para comercializar productos agroquímicos.",
        tags: ["Marketing", "Ventas"],
        start_date: "May 20",
        rating: 4.7,
        reviews: 18_900,
        syllabus: [
            "Segmentación de mercado en el sector agroquímico",
            "Estrategias de marketing digital",
            "Gestión del ciclo de ventas",
            "Fidelización de clientes",
        ],
        video: "https://www.youtube.com/embed/fOGstfMY0So",
    },
    Entry {
        title: "Uso de CRM para Maximizar la Productividad",
        description: "Optimiza la gestión de clientes y procesos con un CRM adecuado.",
        tags: ["CRM", "Productividad"],
        start_date: "May 25",
        rating: 5.0,
        reviews: 30_000,
        syllabus: [
            "Introducción al uso de CRM",
            "Automatización de tareas",
            "Gestión de bases de datos de clientes",
            "Medición de productividad con herramientas de CRM",
        ],
        video: "https://www.youtube.com/embed/NmCcj5iuNUI",
    },
    Entry {
        title: "Planificación de la Demanda y Gestión de Compras",
        description: "Domina las mejores prácticas en gestión de compras y planificación de la demanda.",
        tags: ["Gestión", "Compras"],
        start_date: "May 30",
        rating: 4.9,
        reviews: 25_400,
        syllabus: [
            "Análisis de la demanda en mercados agrícolas",
            "Gestión eficiente de inventarios",
            "Optimización del proceso de compras",
            "Uso de herramientas para pronósticos de demanda",
        ],
        video: "https://www.youtube.com/embed/FwbysuNMLNc",
    },
];

/// All courses, ids starting at 1.
pub fn courses() -> Vec<Course> {
    ENTRIES
        .iter()
        .zip(1u32..)
        .map(|(entry, id)| Course {
            id,
            title: entry.title.to_string(),
            description: entry.description.to_string(),
            tags: entry.tags.iter().map(|t| t.to_string()).collect(),
            start_date: entry.start_date.to_string(),
            rating: entry.rating,
            reviews: entry.reviews,
            syllabus: entry.syllabus.iter().map(|s| s.to_string()).collect(),
            video: entry.video.to_string(),
        })
        .collect()
}

pub fn course(id: u32) -> Option<Course> {
    courses().into_iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_sequential() {
        let ids: Vec<u32> = courses().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_course_lookup() {
        let crm = course(4).unwrap();
        assert_eq!(crm.rating, 5.0);
        assert_eq!(crm.syllabus.len(), 4);
        assert!(course(0).is_none());
        assert!(course(6).is_none());
    }
}
