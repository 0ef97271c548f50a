//! Built-in question bank
//!
//! Sixty multiple-choice questions across seven categories. Every match draws
//! a fresh random subset without replacement.

use crate::types::Question;
use rand::seq::SliceRandom;
use rand::Rng;

type Entry = (&'static str, [&'static str; 4], usize, &'static str);

const BANK: &[Entry] = &[
    // Tech
    ("What does HTTP stand for?", ["HyperText Transfer Protocol", "HighText Transfer Protocol", "HyperText Transit Protocol", "HyperTool Transfer Protocol"], 0, "Tech"),
    ("Which company created JavaScript?", ["Microsoft", "Google", "Netscape", "Apple"], 2, "Tech"),
    ("How many bytes are in a kilobyte?", ["512", "1024", "1000", "2048"], 1, "Tech"),
    ("What does SaaS stand for?", ["Software as a Service", "Sales as a Strategy", "System and Security", "Software and Architecture Stack"], 0, "Tech"),
    ("Which of these is NOT a programming language?", ["Python", "Cobra", "Ruby", "Photoshop"], 3, "Tech"),
    ("What does CPU stand for?", ["Central Process Unit", "Core Processing Unit", "Central Processing Unit", "Computed Processing Unit"], 2, "Tech"),
    ("Which company makes the Android operating system?", ["Apple", "Microsoft", "Samsung", "Google"], 3, "Tech"),
    ("What does UI stand for in design?", ["User Interface", "Unified Integration", "Upload Interface", "User Interaction"], 0, "Tech"),
    ("Which language is primarily used for styling web pages?", ["HTML", "JavaScript", "CSS", "Python"], 2, "Tech"),
    ("What does API stand for?", ["Applied Program Index", "Application Programming Interface", "Automated Process Integration", "Application Process Index"], 1, "Tech"),
    ("What does URL stand for?", ["Uniform Resource Locator", "Universal Remote Link", "Unified Resource Layer", "User Resource Link"], 0, "Tech"),
    ("Which of these is a version control system?", ["Slack", "Docker", "Git", "Jira"], 2, "Tech"),
    // Office
    ("What does KPI stand for?", ["Key Performance Indicator", "Key Process Integration", "Key Product Initiative", "Knowledge Process Index"], 0, "Office"),
    ("What does CEO stand for?", ["Chief Efficiency Officer", "Chief Executive Officer", "Central Executive Officer", "Chief Engagement Officer"], 1, "Office"),
    ("What does ROI stand for?", ["Rate of Income", "Return on Investment", "Revenue over Investment", "Range of Impact"], 1, "Office"),
    ("What does Agile refer to in the workplace?", ["A fitness program", "A project management methodology", "A software language", "An HR system"], 1, "Office"),
    ("What does B2B stand for?", ["Back to Basics", "Business to Business", "Budget to Baseline", "Brand to Buyer"], 1, "Office"),
    ("What does OKR stand for?", ["Objectives and Key Results", "Operations and Key Risks", "Output and Knowledge Review", "Objectives and KPI Rating"], 0, "Office"),
    ("In project management, what is a deliverable?", ["A courier service", "A tangible output of a project", "A team meeting", "A budget report"], 1, "Office"),
    ("What does CRM stand for?", ["Customer Relationship Management", "Central Revenue Model", "Client Reporting Module", "Customer Retention Method"], 0, "Office"),
    ("What does P&L stand for?", ["Product and Logistics", "Profit and Loss", "Planning and Launching", "Policy and Limits"], 1, "Office"),
    ("What is a stakeholder?", ["A butcher", "Anyone with an interest in a project", "A company shareholder only", "The project manager"], 1, "Office"),
    ("What does WFH stand for?", ["Work From Home", "Working For Hours", "Workflow Handling", "Weekly Follow-up Hours"], 0, "Office"),
    ("What is scope creep?", ["A type of software bug", "Uncontrolled expansion of project scope", "A management technique", "A performance review"], 1, "Office"),
    // General
    ("What year was the first iPhone released?", ["2005", "2006", "2007", "2008"], 2, "General"),
    ("What is the most widely spoken language in the world?", ["English", "Spanish", "Hindi", "Mandarin Chinese"], 3, "General"),
    ("How many sides does a hexagon have?", ["5", "6", "7", "8"], 1, "General"),
    ("What is the smallest planet in our solar system?", ["Mars", "Venus", "Mercury", "Pluto"], 2, "General"),
    ("How many continents are there on Earth?", ["5", "6", "7", "8"], 2, "General"),
    ("What is the hardest natural substance on Earth?", ["Gold", "Iron", "Diamond", "Quartz"], 2, "General"),
    ("How many hours are in a week?", ["148", "168", "172", "156"], 1, "General"),
    ("What is the largest ocean on Earth?", ["Atlantic", "Indian", "Arctic", "Pacific"], 3, "General"),
    ("What is the chemical symbol for water?", ["WA", "HO", "H2O", "W2O"], 2, "General"),
    ("Which number is considered unlucky in many Western cultures?", ["7", "11", "13", "17"], 2, "General"),
    // Geography
    ("What is the capital of Japan?", ["Beijing", "Seoul", "Bangkok", "Tokyo"], 3, "Geography"),
    ("What is the capital of Australia?", ["Sydney", "Melbourne", "Canberra", "Brisbane"], 2, "Geography"),
    ("Which country has the largest population?", ["USA", "India", "China", "Indonesia"], 1, "Geography"),
    ("What is the longest river in the world?", ["Amazon", "Yangtze", "Mississippi", "Nile"], 3, "Geography"),
    ("Which country is home to the Eiffel Tower?", ["Italy", "Spain", "Germany", "France"], 3, "Geography"),
    ("What is the capital of Brazil?", ["Rio de Janeiro", "Sao Paulo", "Brasilia", "Salvador"], 2, "Geography"),
    ("Which is the largest country by land area?", ["Canada", "China", "USA", "Russia"], 3, "Geography"),
    ("The Great Barrier Reef is located in which country?", ["USA", "South Africa", "New Zealand", "Australia"], 3, "Geography"),
    // Science
    ("Which planet is known as the Red Planet?", ["Venus", "Jupiter", "Mars", "Saturn"], 2, "Science"),
    ("What gas do plants absorb from the atmosphere?", ["Oxygen", "Nitrogen", "Carbon Dioxide", "Hydrogen"], 2, "Science"),
    ("What is the powerhouse of the cell?", ["Nucleus", "Ribosome", "Mitochondria", "Golgi body"], 2, "Science"),
    ("What is the approximate speed of light in km/s?", ["150,000", "300,000", "500,000", "1,000,000"], 1, "Science"),
    ("How many elements are in the periodic table?", ["108", "116", "118", "124"], 2, "Science"),
    ("What does DNA stand for?", ["Digital Nucleic Acid", "Deoxyribonucleic Acid", "Dynamic Nucleus Array", "Data Nucleic Arrangement"], 1, "Science"),
    ("Which planet has the most moons?", ["Jupiter", "Neptune", "Uranus", "Saturn"], 3, "Science"),
    ("What is the boiling point of water in Celsius?", ["90", "95", "100", "105"], 2, "Science"),
    // History
    ("What year did World War II end?", ["1943", "1944", "1945", "1946"], 2, "History"),
    ("Who was the first person to walk on the Moon?", ["Buzz Aldrin", "Yuri Gagarin", "Neil Armstrong", "John Glenn"], 2, "History"),
    ("In what year did the Berlin Wall fall?", ["1987", "1988", "1989", "1990"], 2, "History"),
    ("Who invented the telephone?", ["Thomas Edison", "Nikola Tesla", "Alexander Graham Bell", "Guglielmo Marconi"], 2, "History"),
    ("What year did the Titanic sink?", ["1910", "1911", "1912", "1913"], 2, "History"),
    // Culture
    ("Who painted the Mona Lisa?", ["Michelangelo", "Raphael", "Leonardo da Vinci", "Donatello"], 2, "Culture"),
    ("Which author wrote Harry Potter?", ["Roald Dahl", "J.R.R. Tolkien", "J.K. Rowling", "C.S. Lewis"], 2, "Culture"),
    ("What is the world's best-selling video game of all time?", ["Tetris", "GTA V", "Minecraft", "Super Mario Bros"], 2, "Culture"),
    ("Which musical instrument has 88 keys?", ["Organ", "Harpsichord", "Piano", "Synthesizer"], 2, "Culture"),
    ("How many players are on a standard soccer team?", ["9", "10", "11", "12"], 2, "Culture"),
];

/// The full bank, in declaration order
pub fn all_questions() -> Vec<Question> {
    BANK.iter()
        .map(|(q, options, correct, category)| Question {
            q: q.to_string(),
            options: options.map(str::to_string),
            correct: *correct,
            category: category.to_string(),
        })
        .collect()
}

pub fn bank_size() -> usize {
    BANK.len()
}

/// Draw `count` distinct questions in random order
pub fn pick_questions(count: usize) -> Vec<Question> {
    pick_questions_with(&mut rand::rng(), count)
}

pub fn pick_questions_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Question> {
    let mut questions = all_questions();
    questions.shuffle(rng);
    questions.truncate(count);
    questions
}
