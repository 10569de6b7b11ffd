//! Built-in eight-week Python course.
//!
//! Week labels are persisted inside progress documents, so they must stay
//! byte-for-byte stable.

use super::{Catalog, CatalogError, Week};
use crate::model::LessonRecord;

/// `(day, title, theory, practice, tasks)`
type Day = (u32, &'static str, &'static str, &'static str, &'static str);

const WEEKS: &[(&str, &[Day])] = &[
    (
        "Неделя 1 — База Python",
        &[
            (
                1,
                "День 1: Введение в Python",
                "Установка Python, интерпретатор, print(), переменные, типы данных (int, float, str, bool)",
                "Калькулятор двух чисел",
                "Настроить рабочее окружение, написать простой калькулятор",
            ),
            (
                2,
                "День 2: Ввод и вывод данных",
                "input(), преобразование типов, арифметика, f-строки",
                "Анкета пользователя",
                "Создать программу с вводом имени, возраста, города",
            ),
            (
                3,
                "День 3: Условные операторы",
                "if, elif, else, логические операторы (and, or, not)",
                "Проверка возраста",
                "Написать программу категоризации по возрасту",
            ),
            (
                4,
                "День 4: Циклы",
                "while, for, range(), break/continue",
                "Таблица умножения, Угадай число",
                "Создать игру угадай число с подсказками",
            ),
            (
                5,
                "День 5: Списки",
                "list, индексы, срезы, методы списков",
                "Список покупок",
                "Программа добавления/удаления товаров",
            ),
            (
                6,
                "День 6-7: Консольная игра",
                "Повторение пройденного",
                "Камень-ножницы-бумага",
                "Создать игру против компьютера",
            ),
        ],
    ),
    (
        "Неделя 2 — Структуры данных и функции",
        &[
            (
                1,
                "День 1: Кортежи, множества, словари",
                "tuple, set, dict",
                "Телефонная книга",
                "Создать словарь контактов с поиском",
            ),
            (
                2,
                "День 2: Функции",
                "def, return, аргументы",
                "Калькулятор через функции",
                "Создать функции для базовых операций",
            ),
            (
                3,
                "День 3: Область видимости и рекурсия",
                "Глобальные/локальные переменные, рекурсия",
                "Рекурсивная функция",
                "Вычислить факториал рекурсивно",
            ),
            (
                4,
                "День 4: Работа со строками",
                "Методы строк (split, join, upper, lower...)",
                "Анализатор текста",
                "Подсчитать слова, символы в тексте",
            ),
            (
                5,
                "День 5: Работа с файлами",
                "open, read, write",
                "Список дел в файл",
                "Сохранять/загружать задачи из файла",
            ),
            (
                6,
                "День 6-7: To-Do лист",
                "Повторение",
                "To-Do с файловым хранилищем",
                "Полноценное приложение списка дел",
            ),
        ],
    ),
    (
        "Неделя 3 — ООП",
        &[
            (
                1,
                "День 1: Классы и объекты",
                "class, объекты, __init__",
                "Создание класса",
                "Создать класс Человек с атрибутами",
            ),
            (
                2,
                "День 2: Методы и атрибуты",
                "self, методы экземпляра",
                "Расширение класса",
                "Добавить методы в класс Человек",
            ),
            (
                3,
                "День 3: Наследование",
                "Наследование, инкапсуляция",
                "Иерархия классов",
                "Создать класс Студент -> Человек",
            ),
            (
                4,
                "День 4: Магические методы",
                "__str__, __repr__",
                "Отладка класса",
                "Добавить магические методы",
            ),
            (
                5,
                "День 5: Банковский аккаунт",
                "ООП на практике",
                "BankAccount",
                "Класс с депозитом, снятием, балансом",
            ),
            (
                6,
                "День 6-7: Улучшение проекта",
                "Повторение ООП",
                "Доработка BankAccount",
                "Добавить историю операций",
            ),
        ],
    ),
    (
        "Неделя 4 — Практика и алгоритмы",
        &[
            (
                1,
                "День 1: Сортировки",
                "Пузырьковая, быстрая сортировка",
                "Сортировка массива",
                "Реализовать 2 вида сортировки",
            ),
            (
                2,
                "День 2: Поиск",
                "Линейный, бинарный поиск",
                "Поиск в массиве",
                "Реализовать бинарный поиск",
            ),
            (
                3,
                "День 3-7: Решение задач",
                "Практика на Codewars/LeetCode",
                "5-10 задач в день",
                "Решать задачи ежедневно",
            ),
        ],
    ),
    (
        "Неделя 5 — Библиотеки",
        &[
            (
                1,
                "День 1: pip и установка",
                "pip, установка библиотек",
                "Установка пакетов",
                "Установить requests, random, datetime",
            ),
            (
                2,
                "День 2: requests и API",
                "Работа с API, HTTP запросы",
                "Курс валют",
                "Получить курс USD/RUB через API",
            ),
            (
                3,
                "День 3-7: Проект",
                "datetime, random",
                "Улучшение проекта",
                "Добавить больше функций",
            ),
        ],
    ),
    (
        "Неделя 6 — GUI или Telegram-бот",
        &[
            (
                1,
                "День 1-2: Выбор направления",
                "Tkinter или aiogram",
                "Установка библиотеки",
                "Установить выбранную библиотеку",
            ),
            (
                2,
                "День 3-4: Основы",
                "Создание окна/бота",
                "Мини-приложение",
                "Создать базовый интерфейс",
            ),
            (
                3,
                "День 5-7: Проект",
                "Продвинутые функции",
                "Полноценное приложение",
                "Завершить проект",
            ),
        ],
    ),
    (
        "Неделя 7 — База данных",
        &[
            (
                1,
                "День 1: SQLite",
                "SQLite, подключение",
                "Создание БД",
                "Создать базу данных",
            ),
            (
                2,
                "День 2: CRUD",
                "CREATE, READ, UPDATE, DELETE",
                "Операции с БД",
                "Реализовать все операции",
            ),
            (
                3,
                "День 3-7: Проект",
                "Интеграция с проектом",
                "To-Do с БД",
                "Перевести To-Do на SQLite",
            ),
        ],
    ),
    (
        "Неделя 8 — Финальный проект",
        &[(
            1,
            "День 1-7: Финальный проект",
            "Выбери проект",
            "Telegram-бот/игра/парсер/расходы",
            "Завершить полноценный проект",
        )],
    ),
];

const MOTIVATIONAL_QUOTES: &[&str] = &[
    "Каждый день приближает тебя к цели!",
    "Ты молодец, что учишься!",
    "Практика - ключ к успеху!",
    "Ошибки - это часть обучения!",
    "Продолжай, ты на правильном пути!",
    "Маленькие шаги ведут к большим результатам!",
    "Сегодня ты станешь лучше, чем вчера!",
    "Программирование - это творчество!",
    "Каждая строка кода - это прогресс!",
    "Верь в себя и у тебя всё получится!",
];

const NOTIFICATION_MESSAGES: &[&str] = &[
    "Время учить Python! Не забудь про практику!",
    "Привет! Как идёт обучение? Сейчас самое время для практики!",
    "Напоминаю: 1-1.5ч теории, 1-2ч практики!",
    "Python ждёт тебя! Открой приложение и учись!",
    "День не прошёл зря, если ты написал хоть строчку кода!",
    "Учишь Python? Отлично! Практикуйся каждый день!",
    "Программирование - это навык. Чем больше практики, тем лучше!",
    "Сделай перерыв и реши пару задач на Codewars!",
    "Помни: консистентность важнее интенсивности!",
    "Твой прогресс зависит от тебя! Начни прямо сейчас!",
];

pub(super) fn build() -> Result<Catalog, CatalogError> {
    let weeks = WEEKS
        .iter()
        .map(|(label, days)| {
            days.iter()
                .fold(Week::new(*label), |week, &(day, title, theory, practice, tasks)| {
                    week.with_day(day, LessonRecord::new(title, theory, practice, tasks))
                })
        })
        .collect();

    Ok(Catalog::new(weeks)?
        .with_motivational_quotes(MOTIVATIONAL_QUOTES.iter().copied())
        .with_notification_messages(NOTIFICATION_MESSAGES.iter().copied()))
}
